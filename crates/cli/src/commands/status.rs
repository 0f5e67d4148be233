// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ob status`: sync state and record counts.

use anyhow::Result;
use ob_core::DashboardStats;
use ob_engine::SyncStatus;
use serde::Serialize;

use crate::color;
use crate::output::{format_or_json, format_time_ago, OutputFormat};

#[derive(Debug, Serialize)]
pub struct StatusReport {
    #[serde(flatten)]
    pub sync: SyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub projects: usize,
    pub employees: usize,
    pub stats: DashboardStats,
}

pub async fn handle(format: OutputFormat) -> Result<()> {
    let coordinator = super::open_hydrated().await?;
    let (projects, employees, stats) =
        coordinator.with_data(|d| (d.projects.len(), d.employees.len(), d.stats()));
    let report = StatusReport {
        sync: coordinator.status(),
        endpoint: coordinator.credentials().map(|c| c.base_url().to_string()),
        projects,
        employees,
        stats,
    };
    format_or_json(format, &report, || {
        for line in render(&report) {
            println!("{line}");
        }
    })
}

fn render(report: &StatusReport) -> Vec<String> {
    let sync = &report.sync;
    let remote = match (&report.endpoint, sync.configured) {
        (Some(endpoint), true) => endpoint.clone(),
        (Some(endpoint), false) => format!("{endpoint} {}", color::muted("(invalid)")),
        (None, _) => color::muted("not configured"),
    };
    let mut lines = vec![
        format!("{} {}", color::header("Sync:"), color::indicator(sync.indicator)),
        format!("  phase:      {}", sync.phase),
        format!("  remote:     {remote}"),
    ];
    if let Some(connection) = &sync.connection {
        lines.push(format!("  connection: {}", connection.message));
    }
    if let Some(at) = sync.last_synced_ms {
        lines.push(format!("  last push:  {} ago", format_time_ago(at)));
    }
    if let Some(err) = &sync.last_error {
        lines.push(format!("  last error: {} {}", err.code, color::muted(&err.message)));
    }
    if sync.local_corrupt {
        lines.push("  local cache was unreadable and has been set aside".to_string());
    }
    let stats = &report.stats;
    lines.push(format!(
        "{} {} ({} planning, {} in progress, {} completed)",
        color::header("Projects:"),
        report.projects,
        stats.planning,
        stats.in_progress,
        stats.completed
    ));
    lines.push(format!("{} {}", color::header("Employees:"), report.employees));
    lines
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
