//! CLI help output specs

use crate::prelude::*;

#[test]
fn ob_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn ob_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("status")
        .stdout_has("remote")
        .stdout_has("sync")
        .stdout_has("project")
        .stdout_has("employee");
}

#[test]
fn ob_project_help_shows_subcommands() {
    cli()
        .args(&["project", "--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("progress")
        .stdout_has("presence");
}

#[test]
fn ob_remote_help_shows_subcommands() {
    cli()
        .args(&["remote", "--help"])
        .passes()
        .stdout_has("set")
        .stdout_has("test")
        .stdout_has("setup-sql");
}

#[test]
fn ob_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
