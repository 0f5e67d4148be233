// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The in-memory record set and every mutation the application performs on it.
//!
//! Both collections are persisted as whole snapshots, so these operations
//! only maintain record-level invariants (unique ids, valid assignments,
//! clamped progress). Persistence is the coordinator's job.

use crate::employee::Employee;
use crate::id::{EmployeeId, ProjectId, RecordId};
use crate::lenient::clamp_percent;
use crate::project::{
    Contract, DailyReport, MaterialPurchase, PresenceRecord, PresenceStatus, Project,
    ProjectPhoto, ProjectStatus,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error("employee not found: {0}")]
    EmployeeNotFound(String),
    #[error("record not found: {0}")]
    RecordNotFound(String),
    #[error("duplicate id: {0}")]
    DuplicateId(String),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Count of projects per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub planning: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl DashboardStats {
    pub fn total(&self) -> usize {
        self.planning + self.in_progress + self.completed
    }
}

/// Projects and employees, each in display order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub projects: Vec<Project>,
    pub employees: Vec<Employee>,
}

impl Dataset {
    pub fn new(projects: Vec<Project>, employees: Vec<Employee>) -> Self {
        Self { projects, employees }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.employees.is_empty()
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Case-insensitive substring match on the project name
    pub fn search_projects(&self, term: &str) -> Vec<&Project> {
        let needle = term.to_lowercase();
        self.projects.iter().filter(|p| p.name.to_lowercase().contains(&needle)).collect()
    }

    pub fn stats(&self) -> DashboardStats {
        let mut stats = DashboardStats::default();
        for p in &self.projects {
            match p.status {
                ProjectStatus::Planning => stats.planning += 1,
                ProjectStatus::InProgress => stats.in_progress += 1,
                ProjectStatus::Completed => stats.completed += 1,
            }
        }
        stats
    }

    /// Roster employees whose weak reference points at `project_id`
    pub fn employees_of(&self, project_id: &str) -> Vec<&Employee> {
        self.employees.iter().filter(|e| e.is_assigned_to(project_id)).collect()
    }

    fn project_mut(&mut self, id: &str) -> Result<&mut Project, DomainError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::ProjectNotFound(id.to_string()))
    }

    fn employee_mut(&mut self, id: &str) -> Result<&mut Employee, DomainError> {
        self.employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| DomainError::EmployeeNotFound(id.to_string()))
    }

    // ── Projects ────────────────────────────────────────────────────────

    /// Register a new obra. The name is stored upper-cased.
    pub fn add_project(&mut self, name: &str, location: &str) -> Result<Project, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyField("project name"));
        }
        let project = Project::new(name.to_uppercase(), location.trim());
        self.insert_project(project.clone())?;
        Ok(project)
    }

    /// Insert a fully formed project, rejecting duplicate ids
    pub fn insert_project(&mut self, project: Project) -> Result<(), DomainError> {
        if self.project(&project.id).is_some() {
            return Err(DomainError::DuplicateId(project.id.to_string()));
        }
        self.projects.push(project);
        Ok(())
    }

    /// Replace a project wholesale, keyed by id
    pub fn update_project(&mut self, project: Project) -> Result<(), DomainError> {
        let slot = self.project_mut(&project.id)?;
        *slot = Project { progress: project.progress.min(100), ..project };
        Ok(())
    }

    pub fn set_progress(&mut self, id: &str, percent: i64) -> Result<u8, DomainError> {
        let project = self.project_mut(id)?;
        project.progress = clamp_percent(percent as f64);
        Ok(project.progress)
    }

    pub fn set_status(&mut self, id: &str, status: ProjectStatus) -> Result<(), DomainError> {
        self.project_mut(id)?.status = status;
        Ok(())
    }

    /// Remove a project and unassign every employee that referenced it.
    pub fn delete_project(&mut self, id: &str) -> Result<Project, DomainError> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DomainError::ProjectNotFound(id.to_string()))?;
        let removed = self.projects.remove(index);
        for employee in self.employees.iter_mut().filter(|e| e.is_assigned_to(id)) {
            employee.project_id = None;
        }
        Ok(removed)
    }

    /// Newest report first
    pub fn add_report(&mut self, project_id: &str, report: DailyReport) -> Result<(), DomainError> {
        let project = self.project_mut(project_id)?;
        if project.reports.iter().any(|r| r.id == report.id) {
            return Err(DomainError::DuplicateId(report.id.to_string()));
        }
        project.reports.insert(0, report);
        Ok(())
    }

    /// Newest purchase first
    pub fn add_purchase(
        &mut self,
        project_id: &str,
        purchase: MaterialPurchase,
    ) -> Result<(), DomainError> {
        if purchase.item.trim().is_empty() {
            return Err(DomainError::EmptyField("purchase item"));
        }
        let project = self.project_mut(project_id)?;
        if project.purchases.iter().any(|p| p.id == purchase.id) {
            return Err(DomainError::DuplicateId(purchase.id.to_string()));
        }
        project.purchases.insert(0, purchase);
        Ok(())
    }

    pub fn remove_purchase(
        &mut self,
        project_id: &str,
        purchase_id: &str,
    ) -> Result<MaterialPurchase, DomainError> {
        let project = self.project_mut(project_id)?;
        let index = project
            .purchases
            .iter()
            .position(|p| p.id == purchase_id)
            .ok_or_else(|| DomainError::RecordNotFound(purchase_id.to_string()))?;
        Ok(project.purchases.remove(index))
    }

    pub fn add_photo(&mut self, project_id: &str, photo: ProjectPhoto) -> Result<(), DomainError> {
        let project = self.project_mut(project_id)?;
        if project.photos.iter().any(|p| p.id == photo.id) {
            return Err(DomainError::DuplicateId(photo.id.to_string()));
        }
        if project.main_photo.is_none() {
            project.main_photo = Some(photo.url.clone());
        }
        project.photos.push(photo);
        Ok(())
    }

    pub fn add_contract(&mut self, project_id: &str, contract: Contract) -> Result<(), DomainError> {
        let project = self.project_mut(project_id)?;
        if project.contracts.iter().any(|c| c.id == contract.id) {
            return Err(DomainError::DuplicateId(contract.id.to_string()));
        }
        project.contracts.push(contract);
        Ok(())
    }

    pub fn add_document(&mut self, project_id: &str, reference: &str) -> Result<(), DomainError> {
        self.project_mut(project_id)?.documents.push(reference.to_string());
        Ok(())
    }

    /// Record attendance for a day.
    ///
    /// Every existing record for `date` is replaced by one record per crew
    /// member; members without an override are marked present.
    pub fn record_presence(
        &mut self,
        project_id: &str,
        date: &str,
        overrides: &HashMap<EmployeeId, PresenceStatus>,
    ) -> Result<Vec<PresenceRecord>, DomainError> {
        if date.trim().is_empty() {
            return Err(DomainError::EmptyField("date"));
        }
        let project = self.project_mut(project_id)?;
        let records: Vec<PresenceRecord> = project
            .employees
            .iter()
            .map(|member| PresenceRecord {
                id: RecordId::new(format!("{date}-{}", member.id)),
                date: date.to_string(),
                employee_id: member.id.clone(),
                employee_name: member.name.clone(),
                status: overrides.get(&member.id).copied().unwrap_or_default(),
            })
            .collect();
        project.presence.retain(|p| p.date != date);
        project.presence.extend(records.iter().cloned());
        Ok(records)
    }

    // ── Employees ───────────────────────────────────────────────────────

    /// Add an unassigned, active employee. Name and role are upper-cased.
    pub fn add_employee(
        &mut self,
        name: &str,
        role: &str,
        daily_rate: Option<f64>,
    ) -> Result<Employee, DomainError> {
        let (name, role) = (name.trim(), role.trim());
        if name.is_empty() {
            return Err(DomainError::EmptyField("employee name"));
        }
        if role.is_empty() {
            return Err(DomainError::EmptyField("employee role"));
        }
        let mut employee = Employee::new(name.to_uppercase(), role.to_uppercase());
        employee.daily_rate = daily_rate;
        self.insert_employee(employee.clone())?;
        Ok(employee)
    }

    pub fn insert_employee(&mut self, employee: Employee) -> Result<(), DomainError> {
        if let Some(project_id) = &employee.project_id {
            if self.project(project_id).is_none() {
                return Err(DomainError::ProjectNotFound(project_id.to_string()));
            }
        }
        if self.employee(&employee.id).is_some() {
            return Err(DomainError::DuplicateId(employee.id.to_string()));
        }
        self.employees.push(employee);
        Ok(())
    }

    /// Replace an employee wholesale. A changed assignment must name an
    /// existing project.
    pub fn update_employee(&mut self, employee: Employee) -> Result<(), DomainError> {
        let current = self.employee(&employee.id).map(|e| e.project_id.clone());
        let Some(current_project) = current else {
            return Err(DomainError::EmployeeNotFound(employee.id.to_string()));
        };
        if employee.project_id != current_project {
            if let Some(project_id) = &employee.project_id {
                if self.project(project_id).is_none() {
                    return Err(DomainError::ProjectNotFound(project_id.to_string()));
                }
            }
        }
        let id = employee.id.clone();
        *self.employee_mut(&id)? = employee;
        Ok(())
    }

    pub fn set_employee_active(&mut self, id: &str, active: bool) -> Result<(), DomainError> {
        self.employee_mut(id)?.active = active;
        for member in self.projects.iter_mut().flat_map(|p| p.employees.iter_mut()) {
            if member.id == id {
                member.active = active;
            }
        }
        Ok(())
    }

    /// Remove from the roster and from every crew
    pub fn delete_employee(&mut self, id: &str) -> Result<Employee, DomainError> {
        let index = self
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| DomainError::EmployeeNotFound(id.to_string()))?;
        for project in &mut self.projects {
            project.employees.retain(|m| m.id != id);
        }
        Ok(self.employees.remove(index))
    }

    /// Move an employee to `project_id` (or unassign with `None`).
    ///
    /// The employee leaves every crew and, when assigned, a fresh snapshot
    /// joins the target project's crew.
    pub fn assign_employee(
        &mut self,
        employee_id: &str,
        project_id: Option<&str>,
    ) -> Result<Employee, DomainError> {
        if let Some(target) = project_id {
            if self.project(target).is_none() {
                return Err(DomainError::ProjectNotFound(target.to_string()));
            }
        }
        let employee = self.employee_mut(employee_id)?;
        employee.project_id = project_id.map(ProjectId::from);
        let snapshot = employee.clone();

        for project in &mut self.projects {
            project.employees.retain(|m| m.id != employee_id);
            if project_id.is_some_and(|target| project.id == target) {
                project.employees.push(snapshot.clone());
            }
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;
