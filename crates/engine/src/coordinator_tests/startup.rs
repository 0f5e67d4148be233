// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup hydration tests

use super::*;
use crate::{Indicator, SyncPhase};
use ob_adapters::Table;
use ob_core::test_support::populated_project;
use ob_storage::PROJECTS_KEY;

#[tokio::test]
async fn first_run_without_remote_is_empty_and_offline() {
    let ctx = unconfigured();
    assert!(!ctx.coordinator.is_configured());
    assert_eq!(ctx.coordinator.phase(), SyncPhase::Uninitialized);

    let hydration = ctx.coordinator.load_initial_data().await;

    assert_eq!(hydration, Hydration::LOCAL);
    assert!(ctx.coordinator.snapshot().is_empty());
    let status = ctx.coordinator.status();
    assert_eq!(status.phase, SyncPhase::LocalAuthoritative);
    assert_eq!(status.indicator, Indicator::Offline);
    assert!(ctx.remote.calls().is_empty());
}

#[tokio::test]
async fn saved_records_survive_a_reload() {
    let ctx = unconfigured();
    ctx.coordinator.load_initial_data().await;
    ctx.coordinator.update(|d| d.add_project("fiji", "Orla")).unwrap();

    let reopened = SyncCoordinator::new(
        ctx.local(),
        ctx.connector.clone(),
        ctx.clock.clone(),
        config(),
    );
    reopened.load_initial_data().await;

    let names: Vec<String> = reopened.snapshot().projects.into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["FIJI".to_string()]);
}

#[tokio::test]
async fn unconfigured_startup_yields_local_records_unmodified() {
    let local = Dataset::new(vec![populated_project("2")], sample_employees());
    let ctx = build(false, |store| store.save_dataset(&local).unwrap());

    ctx.coordinator.load_initial_data().await;

    assert_eq!(ctx.coordinator.snapshot(), local);
    assert_eq!(ctx.local().load_dataset().data, local);
}

#[tokio::test]
async fn reachable_remote_with_rows_is_authoritative() {
    let ctx = with_data(
        Dataset::new(vec![populated_project("old")], Vec::new()),
        Dataset::new(sample_projects(), sample_employees()),
    );

    let hydration = ctx.coordinator.load_initial_data().await;

    assert_eq!(hydration, Hydration { projects: Source::Remote, employees: Source::Remote });
    assert_eq!(ctx.coordinator.snapshot().projects, sample_projects());
    let status = ctx.coordinator.status();
    assert_eq!(status.phase, SyncPhase::RemoteAuthoritative);
    assert_eq!(status.indicator, Indicator::Connected);
    assert_eq!(status.connection, Some(ConnectionReport::connected()));
    assert_eq!(
        ctx.remote.calls(),
        vec![RemoteCall::Probe, RemoteCall::Fetch(Table::Projects), RemoteCall::Fetch(Table::Employees)]
    );
}

#[tokio::test]
async fn remote_records_are_cached_locally() {
    let ctx = with_data(Dataset::default(), Dataset::new(sample_projects(), sample_employees()));
    ctx.coordinator.load_initial_data().await;
    assert_eq!(ctx.local().load_projects().data, sample_projects());
    assert_eq!(ctx.local().load_employees().data, sample_employees());
}

#[tokio::test]
async fn empty_remote_keeps_non_empty_local_cache() {
    let local = Dataset::new(sample_projects(), sample_employees());
    let ctx = with_data(local.clone(), Dataset::default());

    let hydration = ctx.coordinator.load_initial_data().await;

    assert!(ctx.coordinator.test_connection().await.success);
    assert_eq!(hydration, Hydration::LOCAL);
    assert_eq!(ctx.coordinator.snapshot(), local);
    assert_eq!(ctx.coordinator.phase(), SyncPhase::LocalAuthoritative);
    assert_eq!(ctx.coordinator.status().indicator, Indicator::Configured);
}

#[tokio::test]
async fn empty_remote_guard_applies_per_collection() {
    let ctx = with_data(
        Dataset::new(vec![populated_project("local")], sample_employees()),
        Dataset::new(sample_projects(), Vec::new()),
    );

    let hydration = ctx.coordinator.load_initial_data().await;

    assert_eq!(hydration, Hydration { projects: Source::Remote, employees: Source::Local });
    let data = ctx.coordinator.snapshot();
    assert_eq!(data.projects, sample_projects());
    assert_eq!(data.employees, sample_employees());
    assert_eq!(ctx.coordinator.phase(), SyncPhase::RemoteAuthoritative);
}

#[yare::parameterized(
    missing_tables = { RemoteError::MissingTables("projects".into()), "MISSING_TABLES" },
    permission     = { RemoteError::PermissionDenied("rls".into()),   "PERMISSION_DENIED" },
    timeout        = { RemoteError::Timeout,                          "TIMEOUT" },
    network        = { RemoteError::Network("dns".into()),            "FETCH_ERROR" },
)]
fn failed_probe_falls_back_to_local(err: RemoteError, code: &str) {
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
    rt.block_on(async {
        let local = Dataset::new(sample_projects(), Vec::new());
        let ctx = with_data(local.clone(), Dataset::new(vec![populated_project("9")], Vec::new()));
        ctx.remote.set_probe_error(Some(err));

        let hydration = ctx.coordinator.load_initial_data().await;

        assert_eq!(hydration, Hydration::LOCAL);
        assert_eq!(ctx.coordinator.snapshot(), local);
        let status = ctx.coordinator.status();
        assert_eq!(status.phase, SyncPhase::LocalAuthoritative);
        assert_eq!(status.indicator, Indicator::Error);
        assert_eq!(status.connection.and_then(|c| c.code).as_deref(), Some(code));
        assert_eq!(ctx.remote.calls(), vec![RemoteCall::Probe]);
    });
}

#[tokio::test]
async fn fetch_failure_at_startup_degrades_to_local() {
    let local = Dataset::new(sample_projects(), Vec::new());
    let ctx = with_data(local.clone(), Dataset::default());
    ctx.remote.set_fetch_error(Some(RemoteError::MissingTables("employees".into())));

    let hydration = ctx.coordinator.load_initial_data().await;

    assert_eq!(hydration, Hydration::LOCAL);
    assert_eq!(ctx.coordinator.snapshot(), local);
    let status = ctx.coordinator.status();
    assert_eq!(status.last_error.map(|e| e.code).as_deref(), Some("MISSING_TABLES"));
    assert_eq!(status.indicator, Indicator::Error);
}

#[tokio::test]
async fn corrupt_local_cache_is_flagged() {
    let ctx = build(false, |store| store.kv().set(PROJECTS_KEY, "{not json").unwrap());

    ctx.coordinator.load_initial_data().await;

    assert!(ctx.coordinator.snapshot().projects.is_empty());
    assert!(ctx.coordinator.status().local_corrupt);
    assert_eq!(ctx.kv.quarantined().len(), 1);
}

#[tokio::test]
async fn unusable_saved_credentials_leave_coordinator_unconfigured() {
    let ctx = build(false, |store| {
        store.save_credentials(&RemoteCredentials::new("obras.example.co", "k")).unwrap()
    });
    assert!(!ctx.coordinator.is_configured());
    assert!(ctx.coordinator.credentials().is_some());
    assert!(ctx.connector.connected().is_empty());
}
