// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronization coordinator.
//!
//! Owns the in-memory record set. Every mutation is written through to the
//! local store before it returns; pushes to the remote are debounced and run
//! on a snapshot with the state lock released.

use crate::debounce::Debouncer;
use crate::error::SyncError;
use crate::status::{LastError, SyncPhase, SyncStatus, LOCAL_WRITE_FAILED};
use crate::SyncConfig;
use ob_adapters::{ConnectionReport, RemoteConnector, RemoteError, RemoteStore};
use ob_core::{Clock, Dataset, DomainError, Employee, Project, RemoteCredentials};
use ob_storage::{KvStore, LocalStore};
use parking_lot::Mutex;
use std::time::Instant;
use tokio::sync::Notify;

/// Where a collection was hydrated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Local,
    Remote,
}

/// Outcome of startup hydration or a manual resync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hydration {
    pub projects: Source,
    pub employees: Source,
}

impl Hydration {
    const LOCAL: Hydration = Hydration { projects: Source::Local, employees: Source::Local };

    pub fn any_remote(&self) -> bool {
        self.projects == Source::Remote || self.employees == Source::Remote
    }
}

/// Result of one push attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed { projects: usize, employees: usize },
    Failed(RemoteError),
}

struct CoordinatorState<S> {
    data: Dataset,
    remote: Option<S>,
    credentials: Option<RemoteCredentials>,
    phase: SyncPhase,
    /// Phase restored when a push finishes
    settled: SyncPhase,
    debounce: Debouncer,
    push_in_flight: bool,
    connection: Option<ConnectionReport>,
    last_synced_ms: Option<u64>,
    last_error: Option<LastError>,
    local_corrupt: bool,
}

impl<S> CoordinatorState<S> {
    fn settle(&mut self, phase: SyncPhase) {
        self.phase = phase;
        self.settled = phase;
    }

    /// Drop a remote-side error; a pending local write failure stays visible.
    fn clear_remote_error(&mut self) {
        if !self.last_error.as_ref().is_some_and(LastError::is_local_write) {
            self.last_error = None;
        }
    }

    fn clear_local_error(&mut self) {
        if self.last_error.as_ref().is_some_and(LastError::is_local_write) {
            self.last_error = None;
        }
    }
}

/// Either side of a push, taken under the lock
struct PushJob<S> {
    remote: S,
    projects: Vec<Project>,
    employees: Vec<Employee>,
}

pub struct SyncCoordinator<K: KvStore, R: RemoteConnector, C: Clock> {
    local: LocalStore<K>,
    connector: R,
    clock: C,
    state: Mutex<CoordinatorState<R::Store>>,
    /// Wakes the background driver when the deadline may have changed
    wake: Notify,
    /// Signalled whenever a push finishes
    push_done: Notify,
}

impl<K, R, C> SyncCoordinator<K, R, C>
where
    K: KvStore,
    R: RemoteConnector,
    C: Clock,
{
    /// Build a coordinator, connecting with any credentials already saved
    /// locally. Nothing is hydrated until [`Self::load_initial_data`].
    pub fn new(local: LocalStore<K>, connector: R, clock: C, config: SyncConfig) -> Self {
        let credentials = local.load_credentials();
        let remote = credentials.as_ref().and_then(|creds| match connector.connect(creds) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!(error = %e, "saved remote credentials unusable");
                None
            }
        });
        Self {
            local,
            connector,
            clock,
            state: Mutex::new(CoordinatorState {
                data: Dataset::default(),
                remote,
                credentials,
                phase: SyncPhase::Uninitialized,
                settled: SyncPhase::Uninitialized,
                debounce: Debouncer::new(config.debounce_window),
                push_in_flight: false,
                connection: None,
                last_synced_ms: None,
                last_error: None,
                local_corrupt: false,
            }),
            wake: Notify::new(),
            push_done: Notify::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn local(&self) -> &LocalStore<K> {
        &self.local
    }

    // ── Startup and resync ──────────────────────────────────────────────

    /// Hydrate the record set.
    ///
    /// Without a usable remote, or when the connection test fails, both
    /// collections come from the local store. Otherwise each collection
    /// comes from the remote unless the remote copy is empty. Remote errors
    /// here degrade to local data and are recorded in the status.
    pub async fn load_initial_data(&self) -> Hydration {
        let remote = {
            let mut state = self.state.lock();
            state.phase = SyncPhase::Loading;
            state.remote.clone()
        };

        let Some(remote) = remote else {
            self.hydrate_local(None);
            tracing::info!("no remote configured, hydrated from local store");
            return Hydration::LOCAL;
        };

        let report = remote.test_connection().await;
        if !report.success {
            tracing::warn!(code = ?report.code, "remote unreachable, hydrated from local store");
            self.hydrate_local(Some(report));
            return Hydration::LOCAL;
        }

        match fetch_both(&remote).await {
            Ok((projects, employees)) => self.hydrate_merged(report, projects, employees),
            Err(e) => {
                tracing::warn!(code = %e.code(), error = %e, "remote fetch failed at startup");
                self.hydrate_local(Some(report));
                self.record_error(LastError::remote(&e, self.clock.epoch_ms()));
                Hydration::LOCAL
            }
        }
    }

    /// Re-run the probe and fetch on demand.
    ///
    /// A pending push is flushed first so local edits are not overwritten by
    /// older remote rows. Fetch errors are returned and leave the record set
    /// untouched; a failed probe falls back to local data.
    pub async fn resync(&self) -> Result<(ConnectionReport, Hydration), SyncError> {
        self.flush_now().await;

        let remote = self.state.lock().remote.clone();
        let Some(remote) = remote else {
            let report = ConnectionReport::not_configured();
            self.hydrate_local(Some(report.clone()));
            return Ok((report, Hydration::LOCAL));
        };

        let report = remote.test_connection().await;
        if !report.success {
            self.hydrate_local(Some(report.clone()));
            return Ok((report, Hydration::LOCAL));
        }

        let previous = {
            let mut state = self.state.lock();
            let previous = state.phase;
            state.phase = SyncPhase::Syncing;
            previous
        };
        match fetch_both(&remote).await {
            Ok((projects, employees)) => {
                let hydration = self.hydrate_merged(report.clone(), projects, employees);
                Ok((report, hydration))
            }
            Err(e) => {
                let mut state = self.state.lock();
                state.phase = previous;
                state.last_error = Some(LastError::remote(&e, self.clock.epoch_ms()));
                Err(e.into())
            }
        }
    }

    fn hydrate_local(&self, report: Option<ConnectionReport>) {
        let loaded = self.local.load_dataset();
        let mut state = self.state.lock();
        state.data = loaded.data;
        state.local_corrupt = loaded.was_corrupt;
        state.connection = report;
        state.settle(SyncPhase::LocalAuthoritative);
        state.clear_local_error();
    }

    /// Per-collection empty-remote guard, then write the result through.
    fn hydrate_merged(
        &self,
        report: ConnectionReport,
        remote_projects: Vec<Project>,
        remote_employees: Vec<Employee>,
    ) -> Hydration {
        let local = self.local.load_dataset();
        let mut hydration = Hydration::LOCAL;

        let projects = if remote_projects.is_empty() {
            local.data.projects
        } else {
            hydration.projects = Source::Remote;
            remote_projects
        };
        let employees = if remote_employees.is_empty() {
            local.data.employees
        } else {
            hydration.employees = Source::Remote;
            remote_employees
        };
        tracing::info!(
            projects = ?hydration.projects,
            employees = ?hydration.employees,
            project_count = projects.len(),
            employee_count = employees.len(),
            "hydrated record set"
        );

        let data = Dataset::new(projects, employees);
        let write = if hydration.any_remote() { self.local.save_dataset(&data) } else { Ok(()) };

        let mut state = self.state.lock();
        state.data = data;
        state.local_corrupt = local.was_corrupt;
        state.connection = Some(report);
        state.settle(if hydration.any_remote() {
            SyncPhase::RemoteAuthoritative
        } else {
            SyncPhase::LocalAuthoritative
        });
        match write {
            Ok(()) => state.clear_local_error(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to cache remote records locally");
                state.last_error = Some(local_write_error(&e, self.clock.epoch_ms()));
            }
        }
        hydration
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Apply a dataset operation, write both collections through to the
    /// local store, and (re)arm the debounced push.
    ///
    /// A rejected operation changes nothing. A failed local write is
    /// recorded in the status; the in-memory change stands.
    pub fn update<T>(
        &self,
        op: impl FnOnce(&mut Dataset) -> Result<T, DomainError>,
    ) -> Result<T, SyncError> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        let value = op(&mut state.data)?;

        match self.local.save_dataset(&state.data) {
            Ok(()) => state.clear_local_error(),
            Err(e) => {
                tracing::warn!(error = %e, "local write-through failed");
                state.last_error = Some(local_write_error(&e, self.clock.epoch_ms()));
            }
        }

        if state.settled == SyncPhase::RemoteAuthoritative || state.remote.is_some() {
            let deadline = state.debounce.touch(now);
            tracing::debug!(
                in_ms = deadline.saturating_duration_since(now).as_millis() as u64,
                "push scheduled"
            );
            drop(state);
            self.wake.notify_one();
        }
        Ok(value)
    }

    /// Rewrite the current record set to the local store.
    pub fn save_local(&self) -> Result<(), SyncError> {
        let mut state = self.state.lock();
        self.local.save_dataset(&state.data)?;
        state.clear_local_error();
        Ok(())
    }

    // ── Pushes ──────────────────────────────────────────────────────────

    /// Push if the debounce deadline has passed and no push is running.
    ///
    /// Returns `None` when nothing was attempted. A failed push is not
    /// retried; the next mutation schedules a fresh one.
    pub async fn flush_due(&self) -> Option<PushOutcome> {
        let job = self.begin_push(|debounce, now| debounce.take_due(now))?;
        Some(self.run_push(job).await)
    }

    /// Push any pending snapshot immediately, waiting out a running push.
    pub async fn flush_now(&self) -> Option<PushOutcome> {
        loop {
            let done = self.push_done.notified();
            tokio::pin!(done);
            done.as_mut().enable();

            if !self.state.lock().push_in_flight {
                let job = self.begin_push(|debounce, _| debounce.take())?;
                return Some(self.run_push(job).await);
            }
            done.await;
        }
    }

    fn begin_push(
        &self,
        ready: impl FnOnce(&mut Debouncer, Instant) -> bool,
    ) -> Option<PushJob<R::Store>> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        if state.push_in_flight || !ready(&mut state.debounce, now) {
            return None;
        }
        let Some(remote) = state.remote.clone() else {
            tracing::debug!("push due but no remote configured, dropping");
            return None;
        };
        state.push_in_flight = true;
        state.phase = SyncPhase::Syncing;
        Some(PushJob {
            remote,
            projects: state.data.projects.clone(),
            employees: state.data.employees.clone(),
        })
    }

    async fn run_push(&self, job: PushJob<R::Store>) -> PushOutcome {
        let (projects, employees) = (job.projects.len(), job.employees.len());
        tracing::info!(projects, employees, "pushing snapshot");

        let result = match job.remote.push_projects(&job.projects).await {
            Ok(()) => job.remote.push_employees(&job.employees).await,
            Err(e) => Err(e),
        };

        let outcome = {
            let mut state = self.state.lock();
            state.push_in_flight = false;
            state.phase = state.settled;
            let at_ms = self.clock.epoch_ms();
            match result {
                Ok(()) => {
                    state.last_synced_ms = Some(at_ms);
                    state.clear_remote_error();
                    PushOutcome::Pushed { projects, employees }
                }
                Err(e) => {
                    tracing::warn!(code = %e.code(), error = %e, "push failed");
                    state.last_error = Some(LastError::remote(&e, at_ms));
                    PushOutcome::Failed(e)
                }
            }
        };
        self.push_done.notify_waiters();
        self.wake.notify_one();
        outcome
    }

    // ── Configuration ───────────────────────────────────────────────────

    /// Persist credentials and replace the remote handle.
    ///
    /// Returns whether a handle could be built. Invalid credentials are still
    /// saved (so the user can correct them) and leave the coordinator
    /// unconfigured.
    pub fn configure(
        &self,
        endpoint: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<bool, SyncError> {
        let credentials = RemoteCredentials::new(endpoint, key);
        self.local.save_credentials(&credentials)?;

        let remote = match self.connector.connect(&credentials) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!(error = %e, "remote credentials rejected");
                None
            }
        };
        let configured = remote.is_some();
        let mut state = self.state.lock();
        state.remote = remote;
        state.credentials = Some(credentials);
        state.connection = None;
        state.clear_remote_error();
        Ok(configured)
    }

    pub fn is_configured(&self) -> bool {
        self.state.lock().remote.is_some()
    }

    pub fn credentials(&self) -> Option<RemoteCredentials> {
        self.state.lock().credentials.clone()
    }

    /// Probe the remote and remember the report.
    pub async fn test_connection(&self) -> ConnectionReport {
        let remote = self.state.lock().remote.clone();
        let report = match remote {
            Some(remote) => remote.test_connection().await,
            None => ConnectionReport::not_configured(),
        };
        self.state.lock().connection = Some(report.clone());
        report
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Dataset {
        self.state.lock().data.clone()
    }

    /// Borrow the record set for a read without cloning it
    pub fn with_data<T>(&self, f: impl FnOnce(&Dataset) -> T) -> T {
        f(&self.state.lock().data)
    }

    pub fn phase(&self) -> SyncPhase {
        self.state.lock().phase
    }

    pub fn status(&self) -> SyncStatus {
        let state = self.state.lock();
        let configured = state.remote.is_some();
        SyncStatus {
            phase: state.phase,
            configured,
            indicator: SyncStatus::indicator_for(
                state.phase,
                configured,
                state.connection.as_ref(),
                state.last_error.as_ref(),
            ),
            connection: state.connection.clone(),
            last_synced_ms: state.last_synced_ms,
            last_error: state.last_error.clone(),
            local_corrupt: state.local_corrupt,
            pending_push: state.debounce.is_armed(),
        }
    }

    /// Next push deadline, or `None` while idle or while a push runs
    pub fn next_deadline(&self) -> Option<Instant> {
        let state = self.state.lock();
        if state.push_in_flight {
            return None;
        }
        state.debounce.next_deadline()
    }

    pub(crate) async fn woken(&self) {
        self.wake.notified().await
    }

    fn record_error(&self, error: LastError) {
        self.state.lock().last_error = Some(error);
    }
}

fn local_write_error(e: &ob_storage::StorageError, at_ms: u64) -> LastError {
    LastError { code: LOCAL_WRITE_FAILED.to_string(), message: e.to_string(), at_ms }
}

async fn fetch_both<S: RemoteStore>(
    remote: &S,
) -> Result<(Vec<Project>, Vec<Employee>), RemoteError> {
    let projects = remote.fetch_projects().await?;
    let employees = remote.fetch_employees().await?;
    Ok((projects, employees))
}

#[cfg(test)]
#[path = "coordinator_tests/mod.rs"]
mod tests;
