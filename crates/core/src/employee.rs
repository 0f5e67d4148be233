// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::id::{EmployeeId, ProjectId};
use crate::lenient;
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// A worker on the company roster.
///
/// `project_id` is a weak reference: a lookup key into the project
/// collection, validated only at assignment time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub role: String,
    #[serde(default = "default_active", deserialize_with = "lenient::null_as_true")]
    pub active: bool,
    #[serde(default)]
    pub daily_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::blank_as_none")]
    pub project_id: Option<ProjectId>,
}

impl Employee {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: EmployeeId::generate(),
            name: name.into(),
            role: role.into(),
            active: true,
            daily_rate: None,
            project_id: None,
        }
    }

    pub fn is_assigned_to(&self, project_id: &str) -> bool {
        self.project_id.as_ref().is_some_and(|p| p == project_id)
    }
}

#[cfg(test)]
#[path = "employee_tests.rs"]
mod tests;
