// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ob project`: obra records and their logs.

use std::collections::HashMap;

use anyhow::Result;
use clap::{Args, Subcommand};
use ob_core::{
    DailyReport, EmployeeId, MaterialPurchase, PresenceStatus, Project, ProjectStatus, RecordId,
};

use crate::color;
use crate::output::{format_or_json, handle_list, write_table, OutputFormat};

#[derive(Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// List projects
    List {
        /// Case-insensitive match on the name
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Create a project in planning
    Add { name: String, location: String },
    /// Show a project with its logs
    Show { id: String },
    /// Set progress (clamped to 0..=100)
    Progress {
        id: String,
        #[arg(allow_hyphen_values = true)]
        percent: i64,
    },
    /// Set status (planning, in-progress, completed)
    Status { id: String, status: ProjectStatus },
    /// Delete a project and unassign its crew
    Delete { id: String },
    /// Add a daily report
    Report {
        id: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        weather: String,
        #[arg(long)]
        activities: String,
        #[arg(long, default_value = "")]
        observations: String,
        #[arg(long, default_value = "")]
        author: String,
    },
    /// Record a material purchase
    Purchase {
        id: String,
        #[arg(long)]
        item: String,
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "")]
        quantity: String,
        #[arg(long, default_value = "")]
        supplier: String,
        #[arg(long, default_value_t = 0.0)]
        value: f64,
        #[arg(long)]
        observation: Option<String>,
    },
    /// Record attendance for a day; unlisted crew members are present
    Presence {
        id: String,
        #[arg(long)]
        date: String,
        /// Employee marked absent (repeatable)
        #[arg(long = "absent", value_name = "EMPLOYEE")]
        absent: Vec<String>,
        /// Employee marked excused (repeatable)
        #[arg(long = "excused", value_name = "EMPLOYEE")]
        excused: Vec<String>,
    },
}

pub async fn handle(command: ProjectCommand, format: OutputFormat) -> Result<()> {
    match command {
        ProjectCommand::List { search } => {
            let coordinator = super::open_hydrated().await?;
            let projects: Vec<Project> = coordinator.with_data(|d| {
                d.search_projects(search.as_deref().unwrap_or_default()).into_iter().cloned().collect()
            });
            let empty = if search.is_some() { "No matching projects" } else { "No projects" };
            handle_list(format, &projects, empty, |items, out| {
                write_table(
                    out,
                    ["ID", "NAME", "STATUS", "PROGRESS", "CREW", "LOCATION"],
                    &project_rows(items),
                )
            })
        }
        ProjectCommand::Add { name, location } => {
            let project = super::mutate(|d| d.add_project(&name, &location)).await?;
            format_or_json(format, &project, || {
                println!("Project '{}' created ({})", color::header(&project.name), project.id);
            })
        }
        ProjectCommand::Show { id } => {
            let coordinator = super::open_hydrated().await?;
            let project = coordinator
                .with_data(|d| d.project(&id).cloned())
                .ok_or_else(|| anyhow::anyhow!("project not found: {id}"))?;
            format_or_json(format, &project, || {
                for line in render_project(&project) {
                    println!("{line}");
                }
            })
        }
        ProjectCommand::Progress { id, percent } => {
            let progress = super::mutate(|d| d.set_progress(&id, percent)).await?;
            let view = serde_json::json!({ "id": id, "progress": progress });
            format_or_json(format, &view, || println!("Project {id} progress set to {progress}%"))
        }
        ProjectCommand::Status { id, status } => {
            super::mutate(|d| d.set_status(&id, status)).await?;
            let view = serde_json::json!({ "id": id, "status": status.to_string() });
            format_or_json(format, &view, || {
                println!("Project {id} is now {}", color::project_status(status))
            })
        }
        ProjectCommand::Delete { id } => {
            let removed = super::mutate(|d| d.delete_project(&id)).await?;
            format_or_json(format, &removed, || {
                println!("Project '{}' deleted", color::header(&removed.name));
            })
        }
        ProjectCommand::Report { id, date, weather, activities, observations, author } => {
            let report = DailyReport {
                id: RecordId::generate(),
                date,
                weather,
                activities,
                observations,
                author,
            };
            let saved = report.clone();
            super::mutate(|d| d.add_report(&id, saved)).await?;
            format_or_json(format, &report, || {
                println!("Report for {} added to project {id}", report.date);
            })
        }
        ProjectCommand::Purchase { id, item, date, quantity, supplier, value, observation } => {
            let purchase = MaterialPurchase {
                id: RecordId::generate(),
                date,
                item,
                quantity,
                supplier,
                value,
                observation,
            };
            let saved = purchase.clone();
            super::mutate(|d| d.add_purchase(&id, saved)).await?;
            format_or_json(format, &purchase, || {
                println!("Purchase '{}' recorded ({:.2})", purchase.item, purchase.value);
            })
        }
        ProjectCommand::Presence { id, date, absent, excused } => {
            let overrides = presence_overrides(&absent, &excused);
            let records = super::mutate(|d| d.record_presence(&id, &date, &overrides)).await?;
            handle_list(format, &records, "Project has no crew", |items, out| {
                let rows: Vec<[String; 3]> = items
                    .iter()
                    .map(|r| [r.employee_id.to_string(), r.employee_name.clone(), r.status.to_string()])
                    .collect();
                write_table(out, ["EMPLOYEE", "NAME", "STATUS"], &rows)
            })
        }
    }
}

fn project_rows(projects: &[Project]) -> Vec<[String; 6]> {
    projects
        .iter()
        .map(|p| {
            [
                p.id.to_string(),
                p.name.clone(),
                p.status.to_string(),
                format!("{}%", p.progress),
                p.employees.len().to_string(),
                p.location.clone(),
            ]
        })
        .collect()
}

/// Excused wins when an employee is listed under both flags
fn presence_overrides(absent: &[String], excused: &[String]) -> HashMap<EmployeeId, PresenceStatus> {
    let mut overrides: HashMap<EmployeeId, PresenceStatus> =
        absent.iter().map(|id| (EmployeeId::new(id.as_str()), PresenceStatus::Absent)).collect();
    for id in excused {
        overrides.insert(EmployeeId::new(id.as_str()), PresenceStatus::Excused);
    }
    overrides
}

fn render_project(p: &Project) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", color::header(&p.name), color::muted(&format!("({})", p.id))),
        format!("  status:    {}", color::project_status(p.status)),
        format!("  progress:  {}%", p.progress),
        format!("  location:  {}", p.location),
    ];
    if !p.employees.is_empty() {
        let crew: Vec<&str> = p.employees.iter().map(|e| e.name.as_str()).collect();
        lines.push(format!("  crew:      {}", crew.join(", ")));
    }
    if let Some(latest) = p.reports.first() {
        lines.push(format!(
            "  reports:   {} (latest {}: {})",
            p.reports.len(),
            latest.date,
            latest.activities
        ));
    }
    if !p.purchases.is_empty() {
        lines.push(format!(
            "  purchases: {} totalling {:.2}",
            p.purchases.len(),
            p.purchases_total()
        ));
    }
    if !p.photos.is_empty() {
        lines.push(format!("  photos:    {}", p.photos.len()));
    }
    if !p.contracts.is_empty() {
        lines.push(format!("  contracts: {}", p.contracts.len()));
    }
    if !p.documents.is_empty() {
        lines.push(format!("  documents: {}", p.documents.join(", ")));
    }
    lines
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
