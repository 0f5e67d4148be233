// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ob sync`: manual resync with the hosted store.

use anyhow::Result;
use ob_adapters::ConnectionReport;
use ob_engine::{Hydration, Source};
use serde::Serialize;

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

#[derive(Debug, Serialize)]
struct SyncView {
    connection: ConnectionReport,
    projects_from: &'static str,
    employees_from: &'static str,
    projects: usize,
    employees: usize,
}

fn source_label(source: Source) -> &'static str {
    match source {
        Source::Local => "local",
        Source::Remote => "remote",
    }
}

impl SyncView {
    fn new(connection: ConnectionReport, hydration: Hydration, counts: (usize, usize)) -> Self {
        Self {
            connection,
            projects_from: source_label(hydration.projects),
            employees_from: source_label(hydration.employees),
            projects: counts.0,
            employees: counts.1,
        }
    }
}

pub async fn handle(format: OutputFormat) -> Result<()> {
    let coordinator = super::open()?;
    let (connection, hydration) = coordinator.resync().await?;
    let counts = coordinator.with_data(|d| (d.projects.len(), d.employees.len()));
    let view = SyncView::new(connection, hydration, counts);

    format_or_json(format, &view, || {
        if view.connection.success {
            println!(
                "{} {} projects ({}), {} employees ({})",
                color::header("Synced:"),
                view.projects,
                view.projects_from,
                view.employees,
                view.employees_from
            );
        } else {
            println!("{} {}", color::header("Offline:"), view.connection.message);
            println!("{}", color::muted("using the local copy"));
        }
    })?;
    if view.connection.success {
        Ok(())
    } else {
        Err(ExitError::silent(1).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_labels_each_collection() {
        let hydration = Hydration { projects: Source::Remote, employees: Source::Local };
        let view = SyncView::new(ConnectionReport::connected(), hydration, (4, 2));
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["projects_from"], "remote");
        assert_eq!(value["employees_from"], "local");
        assert_eq!(value["connection"]["success"], true);
    }
}
