// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ob: offline-first ledger for construction sites

mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{employee, project, remote, status, sync};
use exit_error::ExitError;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "ob", version, styles = color::styles())]
#[command(about = "Construction-site records that work offline and sync when they can")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync state and record counts
    Status {},
    /// Configure the hosted store
    Remote(remote::RemoteArgs),
    /// Push pending edits and reload from the hosted store
    Sync {},
    /// Manage projects
    Project(project::ProjectArgs),
    /// Manage employees
    Employee(employee::EmployeeArgs),
}

fn init_tracing() {
    let filter =
        EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.output;
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };
    match command {
        Commands::Status {} => status::handle(format).await,
        Commands::Remote(args) => remote::handle(args.command, format).await,
        Commands::Sync {} => sync::handle(format).await,
        Commands::Project(args) => project::handle(args.command, format).await,
        Commands::Employee(args) => employee::handle(args.command, format).await,
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("{}", exit.message);
                }
                exit.code
            }
            None => {
                eprintln!("Error: {e:#}");
                1
            }
        };
        std::process::exit(code);
    }
}
