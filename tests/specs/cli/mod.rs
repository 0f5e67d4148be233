mod help;
mod offline;
mod remote;
