// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local persistence of the record set and remote credentials.
//!
//! Each collection is one JSON array under one key, rewritten whole on every
//! save. Reads never fail: absent values load as empty, unreadable ones load
//! as empty with `was_corrupt` set and are moved aside.

use crate::kv::KvStore;
use ob_core::{Dataset, Employee, Project, RemoteCredentials};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub const PROJECTS_KEY: &str = "projects_cache";
pub const EMPLOYEES_KEY: &str = "employees_cache";
pub const REMOTE_CONFIG_KEY: &str = "remote_config";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A value read from the local store, tagged with whether the stored bytes
/// had to be discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    pub was_corrupt: bool,
}

impl<T> Loaded<T> {
    pub fn clean(data: T) -> Self {
        Self { data, was_corrupt: false }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded { data: f(self.data), was_corrupt: self.was_corrupt }
    }
}

/// Local Store Adapter over any [`KvStore`]
#[derive(Clone)]
pub struct LocalStore<K: KvStore> {
    kv: K,
}

impl<K: KvStore> LocalStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub fn load_projects(&self) -> Loaded<Vec<Project>> {
        self.load_or_default(PROJECTS_KEY)
    }

    pub fn save_projects(&self, projects: &[Project]) -> Result<(), StorageError> {
        self.save(PROJECTS_KEY, projects)
    }

    pub fn load_employees(&self) -> Loaded<Vec<Employee>> {
        self.load_or_default(EMPLOYEES_KEY)
    }

    pub fn save_employees(&self, employees: &[Employee]) -> Result<(), StorageError> {
        self.save(EMPLOYEES_KEY, employees)
    }

    /// Both collections; corrupt if either was
    pub fn load_dataset(&self) -> Loaded<Dataset> {
        let projects = self.load_projects();
        let employees = self.load_employees();
        Loaded {
            data: Dataset::new(projects.data, employees.data),
            was_corrupt: projects.was_corrupt || employees.was_corrupt,
        }
    }

    /// Projects first, then employees. Stops at the first failure.
    pub fn save_dataset(&self, data: &Dataset) -> Result<(), StorageError> {
        self.save_projects(&data.projects)?;
        self.save_employees(&data.employees)
    }

    /// Saved credentials; `None` when absent or unreadable.
    pub fn load_credentials(&self) -> Option<RemoteCredentials> {
        let loaded: Loaded<Option<RemoteCredentials>> = self.load_or_default(REMOTE_CONFIG_KEY);
        loaded.data
    }

    pub fn save_credentials(&self, credentials: &RemoteCredentials) -> Result<(), StorageError> {
        self.save(REMOTE_CONFIG_KEY, credentials)
    }

    pub fn clear_credentials(&self) -> Result<(), StorageError> {
        self.kv.remove(REMOTE_CONFIG_KEY)
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.kv.set(key, &raw)
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Loaded<T> {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Loaded::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "local read failed, treating as empty");
                return Loaded::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(data) => Loaded::clean(data),
            Err(e) => {
                tracing::warn!(key, error = %e, "local value unreadable, starting empty");
                if let Err(e) = self.kv.quarantine(key) {
                    tracing::warn!(key, error = %e, "failed to move unreadable value aside");
                }
                Loaded { data: T::default(), was_corrupt: true }
            }
        }
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
