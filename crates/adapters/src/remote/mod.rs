// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote store adapter: the hosted `projects` / `employees` tables.

mod http;

pub use http::{HttpConnector, HttpRemoteStore, DEFAULT_REMOTE_TIMEOUT};

use async_trait::async_trait;
use ob_core::{CredentialsError, Employee, Project, RemoteCredentials};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Setup script that creates both tables and their access policies
pub const SETUP_SQL: &str = include_str!("../../sql/schema.sql");

/// Remote table backing one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Projects,
    Employees,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Projects => "projects",
            Table::Employees => "employees",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified remote failure.
///
/// Every variant maps to a stable status code via [`RemoteError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("tables not found: {0}")]
    MissingTables(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Backend { status: u16, code: Option<String>, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid remote configuration: {0}")]
    Config(String),
}

impl From<CredentialsError> for RemoteError {
    fn from(e: CredentialsError) -> Self {
        RemoteError::Config(e.to_string())
    }
}

/// Body of a PostgREST error response
#[derive(Debug, Default, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl RemoteError {
    /// Stable code reported in status and connection reports
    pub fn code(&self) -> String {
        match self {
            RemoteError::MissingTables(_) => "MISSING_TABLES".to_string(),
            RemoteError::PermissionDenied(_) => "PERMISSION_DENIED".to_string(),
            RemoteError::Timeout => "TIMEOUT".to_string(),
            RemoteError::Network(_) => "FETCH_ERROR".to_string(),
            RemoteError::Backend { code: Some(code), .. } => code.clone(),
            RemoteError::Backend { status, code: None, .. } => format!("HTTP_{status}"),
            RemoteError::Decode(_) => "INVALID_RESPONSE".to_string(),
            RemoteError::Config(_) => "INVALID_CONFIG".to_string(),
        }
    }

    /// Classify a non-success HTTP response.
    ///
    /// Missing relations (`42P01`, or `PGRST205` from newer gateways) mean the
    /// setup script was never run. Privilege errors (`42501`, any message
    /// mentioning "permission denied", or a bare 403) mean the access
    /// policies reject the key.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: BackendErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| body.trim().chars().take(200).collect());
        let code = parsed.code.filter(|c| !c.is_empty());

        match code.as_deref() {
            Some("42P01") | Some("PGRST205") => return RemoteError::MissingTables(message),
            Some("42501") => return RemoteError::PermissionDenied(message),
            _ => {}
        }
        if message.to_lowercase().contains("permission denied") || (status == 403 && code.is_none())
        {
            return RemoteError::PermissionDenied(message);
        }
        RemoteError::Backend { status, code, message }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::Timeout
        } else if e.is_decode() {
            RemoteError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            RemoteError::Backend { status: status.as_u16(), code: None, message: e.to_string() }
        } else {
            RemoteError::Network(e.to_string())
        }
    }
}

/// Outcome of a connectivity test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionReport {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ConnectionReport {
    pub fn connected() -> Self {
        Self { success: true, message: "connected with read access".to_string(), code: None }
    }

    pub fn not_configured() -> Self {
        Self { success: false, message: "waiting for endpoint and key".to_string(), code: None }
    }

    pub fn from_error(err: &RemoteError) -> Self {
        let message = match err {
            RemoteError::MissingTables(_) => "tables not found; run the setup SQL".to_string(),
            RemoteError::PermissionDenied(_) => {
                "permission denied; check the table access policies".to_string()
            }
            RemoteError::Timeout => "connection timed out".to_string(),
            RemoteError::Network(_) => "network error while connecting".to_string(),
            other => format!("error: {other}"),
        };
        Self { success: false, message, code: Some(err.code()) }
    }
}

/// Bulk read/upsert access to the hosted tables.
///
/// Implementations never retry; callers decide what a failure means.
#[async_trait]
pub trait RemoteStore: Clone + Send + Sync + 'static {
    /// Minimal read (`select id from projects limit 1`)
    async fn probe(&self) -> Result<(), RemoteError>;

    async fn fetch_projects(&self) -> Result<Vec<Project>, RemoteError>;

    async fn fetch_employees(&self) -> Result<Vec<Employee>, RemoteError>;

    /// Upsert by id as one all-or-nothing batch. Empty batches send nothing.
    async fn push_projects(&self, projects: &[Project]) -> Result<(), RemoteError>;

    /// Upsert by id as one all-or-nothing batch. Empty batches send nothing.
    async fn push_employees(&self, employees: &[Employee]) -> Result<(), RemoteError>;

    /// Probe and classify the result. Never fails.
    async fn test_connection(&self) -> ConnectionReport {
        match self.probe().await {
            Ok(()) => ConnectionReport::connected(),
            Err(e) => {
                tracing::warn!(code = %e.code(), error = %e, "remote connection test failed");
                ConnectionReport::from_error(&e)
            }
        }
    }
}

/// Builds a [`RemoteStore`] handle from credentials.
pub trait RemoteConnector: Clone + Send + Sync + 'static {
    type Store: RemoteStore;

    /// Validate credentials and build a fresh handle. Never touches the network.
    fn connect(&self, credentials: &RemoteCredentials) -> Result<Self::Store, RemoteError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{RemoteConnector, RemoteError, RemoteStore, Table};
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use ob_core::{Employee, EmployeeId, Project, ProjectId, RemoteCredentials};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tokio::sync::Semaphore;

    /// Recorded remote operation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RemoteCall {
        Probe,
        Fetch(Table),
        PushProjects(Vec<ProjectId>),
        PushEmployees(Vec<EmployeeId>),
    }

    #[derive(Default)]
    struct FakeRemoteState {
        projects: IndexMap<ProjectId, Project>,
        employees: IndexMap<EmployeeId, Employee>,
        probe_error: Option<RemoteError>,
        fetch_error: Option<RemoteError>,
        push_error: Option<RemoteError>,
        push_gate: Option<Arc<Semaphore>>,
        calls: Vec<RemoteCall>,
    }

    /// In-memory tables with failure injection.
    ///
    /// Upserts are all-or-nothing: an injected push error leaves every row
    /// untouched.
    #[derive(Clone, Default)]
    pub struct FakeRemoteStore {
        inner: Arc<Mutex<FakeRemoteState>>,
    }

    impl FakeRemoteStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_rows(projects: Vec<Project>, employees: Vec<Employee>) -> Self {
            let store = Self::new();
            store.seed(projects, employees);
            store
        }

        pub fn seed(&self, projects: Vec<Project>, employees: Vec<Employee>) {
            let mut inner = self.inner.lock();
            for p in projects {
                inner.projects.insert(p.id.clone(), p);
            }
            for e in employees {
                inner.employees.insert(e.id.clone(), e);
            }
        }

        pub fn projects(&self) -> Vec<Project> {
            self.inner.lock().projects.values().cloned().collect()
        }

        pub fn employees(&self) -> Vec<Employee> {
            self.inner.lock().employees.values().cloned().collect()
        }

        pub fn set_probe_error(&self, err: Option<RemoteError>) {
            self.inner.lock().probe_error = err;
        }

        pub fn set_fetch_error(&self, err: Option<RemoteError>) {
            self.inner.lock().fetch_error = err;
        }

        pub fn set_push_error(&self, err: Option<RemoteError>) {
            self.inner.lock().push_error = err;
        }

        /// Hold pushes until permits are added to the returned semaphore; each
        /// non-empty push consumes one
        pub fn hold_pushes(&self) -> Arc<Semaphore> {
            let gate = Arc::new(Semaphore::new(0));
            self.inner.lock().push_gate = Some(Arc::clone(&gate));
            gate
        }

        /// Get all recorded calls
        pub fn calls(&self) -> Vec<RemoteCall> {
            self.inner.lock().calls.clone()
        }

        pub fn push_count(&self) -> usize {
            self.calls()
                .iter()
                .filter(|c| matches!(c, RemoteCall::PushProjects(_) | RemoteCall::PushEmployees(_)))
                .count()
        }

        pub fn clear_calls(&self) {
            self.inner.lock().calls.clear();
        }

        async fn wait_gate(&self) {
            let gate = self.inner.lock().push_gate.clone();
            if let Some(gate) = gate {
                if let Ok(permit) = gate.acquire().await {
                    permit.forget();
                }
            }
        }
    }

    #[async_trait]
    impl RemoteStore for FakeRemoteStore {
        async fn probe(&self) -> Result<(), RemoteError> {
            let mut inner = self.inner.lock();
            inner.calls.push(RemoteCall::Probe);
            match &inner.probe_error {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }

        async fn fetch_projects(&self) -> Result<Vec<Project>, RemoteError> {
            let mut inner = self.inner.lock();
            inner.calls.push(RemoteCall::Fetch(Table::Projects));
            if let Some(e) = &inner.fetch_error {
                return Err(e.clone());
            }
            Ok(inner.projects.values().cloned().collect())
        }

        async fn fetch_employees(&self) -> Result<Vec<Employee>, RemoteError> {
            let mut inner = self.inner.lock();
            inner.calls.push(RemoteCall::Fetch(Table::Employees));
            if let Some(e) = &inner.fetch_error {
                return Err(e.clone());
            }
            Ok(inner.employees.values().cloned().collect())
        }

        async fn push_projects(&self, projects: &[Project]) -> Result<(), RemoteError> {
            if projects.is_empty() {
                return Ok(());
            }
            self.wait_gate().await;
            let mut inner = self.inner.lock();
            inner.calls.push(RemoteCall::PushProjects(projects.iter().map(|p| p.id.clone()).collect()));
            if let Some(e) = &inner.push_error {
                return Err(e.clone());
            }
            for p in projects {
                inner.projects.insert(p.id.clone(), p.clone());
            }
            Ok(())
        }

        async fn push_employees(&self, employees: &[Employee]) -> Result<(), RemoteError> {
            if employees.is_empty() {
                return Ok(());
            }
            self.wait_gate().await;
            let mut inner = self.inner.lock();
            inner
                .calls
                .push(RemoteCall::PushEmployees(employees.iter().map(|e| e.id.clone()).collect()));
            if let Some(e) = &inner.push_error {
                return Err(e.clone());
            }
            for e in employees {
                inner.employees.insert(e.id.clone(), e.clone());
            }
            Ok(())
        }
    }

    struct FakeConnectorState {
        connect_error: Option<RemoteError>,
        connected: Vec<RemoteCredentials>,
    }

    /// Hands out clones of one shared [`FakeRemoteStore`]
    #[derive(Clone)]
    pub struct FakeRemoteConnector {
        store: FakeRemoteStore,
        inner: Arc<Mutex<FakeConnectorState>>,
    }

    impl FakeRemoteConnector {
        pub fn new(store: FakeRemoteStore) -> Self {
            Self {
                store,
                inner: Arc::new(Mutex::new(FakeConnectorState {
                    connect_error: None,
                    connected: Vec::new(),
                })),
            }
        }

        pub fn store(&self) -> &FakeRemoteStore {
            &self.store
        }

        pub fn set_connect_error(&self, err: Option<RemoteError>) {
            self.inner.lock().connect_error = err;
        }

        /// Credentials of every successful connect, in order
        pub fn connected(&self) -> Vec<RemoteCredentials> {
            self.inner.lock().connected.clone()
        }
    }

    impl Default for FakeRemoteConnector {
        fn default() -> Self {
            Self::new(FakeRemoteStore::new())
        }
    }

    impl RemoteConnector for FakeRemoteConnector {
        type Store = FakeRemoteStore;

        fn connect(&self, credentials: &RemoteCredentials) -> Result<FakeRemoteStore, RemoteError> {
            credentials.validate()?;
            let mut inner = self.inner.lock();
            if let Some(e) = &inner.connect_error {
                return Err(e.clone());
            }
            inner.connected.push(credentials.clone());
            Ok(self.store.clone())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRemoteConnector, FakeRemoteStore, RemoteCall};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
