// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ob employee`: roster management.

use anyhow::Result;
use clap::{Args, Subcommand};
use ob_core::{Dataset, Employee};

use crate::color;
use crate::output::{format_or_json, handle_list, write_table, OutputFormat};

#[derive(Args)]
pub struct EmployeeArgs {
    #[command(subcommand)]
    pub command: EmployeeCommand,
}

#[derive(Subcommand)]
pub enum EmployeeCommand {
    /// List the roster
    List {},
    /// Add an unassigned employee
    Add {
        name: String,
        role: String,
        #[arg(long)]
        daily_rate: Option<f64>,
    },
    /// Assign to a project, or unassign when no project is given
    Assign { id: String, project: Option<String> },
    /// Mark an employee inactive
    Deactivate { id: String },
    /// Remove from the roster and every crew
    Delete { id: String },
}

pub async fn handle(command: EmployeeCommand, format: OutputFormat) -> Result<()> {
    match command {
        EmployeeCommand::List {} => {
            let coordinator = super::open_hydrated().await?;
            let (employees, rows) = coordinator.with_data(|d| (d.employees.clone(), employee_rows(d)));
            handle_list(format, &employees, "No employees", |_, out| {
                write_table(out, ["ID", "NAME", "ROLE", "ACTIVE", "PROJECT"], &rows)
            })
        }
        EmployeeCommand::Add { name, role, daily_rate } => {
            let employee = super::mutate(|d| d.add_employee(&name, &role, daily_rate)).await?;
            format_or_json(format, &employee, || {
                println!("Employee '{}' added ({})", color::header(&employee.name), employee.id);
            })
        }
        EmployeeCommand::Assign { id, project } => {
            let employee = super::mutate(|d| d.assign_employee(&id, project.as_deref())).await?;
            format_or_json(format, &employee, || match &employee.project_id {
                Some(project) => println!("Employee '{}' assigned to {project}", employee.name),
                None => println!("Employee '{}' unassigned", employee.name),
            })
        }
        EmployeeCommand::Deactivate { id } => {
            super::mutate(|d| d.set_employee_active(&id, false)).await?;
            let view = serde_json::json!({ "id": id, "active": false });
            format_or_json(format, &view, || println!("Employee {id} deactivated"))
        }
        EmployeeCommand::Delete { id } => {
            let removed = super::mutate(|d| d.delete_employee(&id)).await?;
            format_or_json(format, &removed, || {
                println!("Employee '{}' deleted", color::header(&removed.name));
            })
        }
    }
}

/// Roster rows with the assigned project's name resolved
fn employee_rows(data: &Dataset) -> Vec<[String; 5]> {
    data.employees
        .iter()
        .map(|e: &Employee| {
            let project = e
                .project_id
                .as_ref()
                .map(|id| data.project(id).map(|p| p.name.clone()).unwrap_or_else(|| id.to_string()))
                .unwrap_or_else(|| "-".to_string());
            [
                e.id.to_string(),
                e.name.clone(),
                e.role.clone(),
                if e.active { "yes" } else { "no" }.to_string(),
                project,
            ]
        })
        .collect()
}
