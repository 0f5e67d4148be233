// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ob remote`: hosted store configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use ob_adapters::{ConnectionReport, SETUP_SQL};
use ob_core::RemoteCredentials;
use serde::Serialize;

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

#[derive(Args)]
pub struct RemoteArgs {
    #[command(subcommand)]
    pub command: RemoteCommand,
}

#[derive(Subcommand)]
pub enum RemoteCommand {
    /// Save endpoint and key, then test the connection
    Set {
        /// Base URL of the hosted store (https://…)
        endpoint: String,
        /// Access key (anon key)
        key: String,
    },
    /// Test the saved connection
    Test {},
    /// Show the saved endpoint (key masked)
    Show {},
    /// Print the SQL that creates the expected tables
    SetupSql {},
}

#[derive(Debug, Serialize)]
struct RemoteView {
    configured: bool,
    endpoint: Option<String>,
    key: Option<String>,
}

impl RemoteView {
    fn new(credentials: Option<&RemoteCredentials>) -> Self {
        Self {
            configured: credentials.is_some_and(RemoteCredentials::is_valid),
            endpoint: credentials.map(|c| c.endpoint.clone()),
            key: credentials.map(RemoteCredentials::masked_key),
        }
    }
}

pub async fn handle(command: RemoteCommand, format: OutputFormat) -> Result<()> {
    match command {
        RemoteCommand::Set { endpoint, key } => {
            let coordinator = super::open()?;
            let candidate = RemoteCredentials::new(endpoint.as_str(), key.as_str());
            if !coordinator.configure(endpoint, key)? {
                let reason = candidate.validate().err().map(|e| e.to_string()).unwrap_or_default();
                return Err(ExitError::new(1, format!("Remote not usable: {reason}")).into());
            }
            let report = coordinator.test_connection().await;
            print_report(&report, format)
        }
        RemoteCommand::Test {} => {
            let coordinator = super::open()?;
            let report = coordinator.test_connection().await;
            print_report(&report, format)
        }
        RemoteCommand::Show {} => {
            let coordinator = super::open()?;
            let credentials = coordinator.credentials();
            let view = RemoteView::new(credentials.as_ref());
            format_or_json(format, &view, || match (&view.endpoint, &view.key) {
                (Some(endpoint), Some(key)) => {
                    println!("{} {}", color::header("Endpoint:"), endpoint);
                    println!("{} {}", color::header("Key:"), key);
                    if !view.configured {
                        println!("{}", color::muted("(saved values are not usable)"));
                    }
                }
                _ => println!("No remote configured"),
            })
        }
        RemoteCommand::SetupSql {} => {
            print!("{SETUP_SQL}");
            Ok(())
        }
    }
}

/// Print the connection test outcome; a failure exits 1.
fn print_report(report: &ConnectionReport, format: OutputFormat) -> Result<()> {
    format_or_json(format, report, || {
        if report.success {
            println!("{} {}", color::header("Connected:"), report.message);
        } else {
            let code = report.code.as_deref().unwrap_or("ERROR");
            println!("{} {} ({})", color::header("Failed:"), report.message, code);
        }
    })?;
    if report.success {
        Ok(())
    } else {
        Err(ExitError::silent(1).into())
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
