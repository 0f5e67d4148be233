// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Obra records and the collections nested inside them.
//!
//! Field names and enum strings match the `projects` table of the deployed
//! backend, so a record serializes to exactly one row.

use crate::employee::Employee;
use crate::id::{ProjectId, RecordId};
use crate::lenient;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle stage of an obra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "Planejamento", alias = "Planning")]
    Planning,
    #[serde(rename = "Em andamento", alias = "InProgress")]
    InProgress,
    #[serde(rename = "Concluída", alias = "Completed")]
    Completed,
}

crate::simple_display! {
    ProjectStatus {
        Planning => "planning",
        InProgress => "in-progress",
        Completed => "completed",
    }
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] =
        [ProjectStatus::Planning, ProjectStatus::InProgress, ProjectStatus::Completed];
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "planning" | "planejamento" => Ok(Self::Planning),
            "in-progress" | "inprogress" | "em-andamento" => Ok(Self::InProgress),
            "completed" | "done" | "concluída" | "concluida" => Ok(Self::Completed),
            other => Err(format!("unknown project status: {other}")),
        }
    }
}

/// Daily construction activity report (RDO)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub id: RecordId,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub weather: String,
    #[serde(default)]
    pub activities: String,
    #[serde(default)]
    pub observations: String,
    #[serde(default)]
    pub author: String,
}

/// Material purchase entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPurchase {
    pub id: RecordId,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPhoto {
    pub id: RecordId,
    pub url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PresenceStatus {
    #[default]
    #[serde(rename = "Presente", alias = "Present")]
    Present,
    #[serde(rename = "Faltou", alias = "Absent")]
    Absent,
    #[serde(rename = "Atestado", alias = "Excused")]
    Excused,
}

crate::simple_display! {
    PresenceStatus {
        Present => "present",
        Absent => "absent",
        Excused => "excused",
    }
}

/// One attendance mark for one crew member on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceRecord {
    pub id: RecordId,
    pub date: String,
    pub employee_id: crate::EmployeeId,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub status: PresenceStatus,
}

/// Which side of the job a contract binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractKind {
    #[serde(rename = "cliente", alias = "Client")]
    Client,
    #[serde(rename = "empreiteiro", alias = "Contractor")]
    Contractor,
}

crate::simple_display! {
    ContractKind {
        Client => "client",
        Contractor => "contractor",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: ContractKind,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub date: String,
}

/// A tracked construction site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::percent")]
    pub progress: u8,
    #[serde(default, deserialize_with = "lenient::blank_as_none")]
    pub main_photo: Option<String>,
    /// Crew assignments: snapshots of roster employees at assignment time.
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub employees: Vec<Employee>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub reports: Vec<DailyReport>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub purchases: Vec<MaterialPurchase>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub photos: Vec<ProjectPhoto>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub presence: Vec<PresenceRecord>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub contracts: Vec<Contract>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub documents: Vec<String>,
}

impl Project {
    /// A new obra in planning with empty collections
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: ProjectId::generate(),
            name: name.into(),
            status: ProjectStatus::Planning,
            location: location.into(),
            progress: 0,
            main_photo: None,
            employees: Vec::new(),
            reports: Vec::new(),
            purchases: Vec::new(),
            photos: Vec::new(),
            presence: Vec::new(),
            contracts: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Sum of all purchase values
    pub fn purchases_total(&self) -> f64 {
        self.purchases.iter().map(|p| p.value).sum()
    }

    pub fn has_crew_member(&self, employee_id: &str) -> bool {
        self.employees.iter().any(|e| e.id == employee_id)
    }

    /// Presence records for one day, in crew order
    pub fn presence_on(&self, date: &str) -> Vec<&PresenceRecord> {
        self.presence.iter().filter(|p| p.date == date).collect()
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
