// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::{Indicator, SyncPhase};
use ob_adapters::Table;

#[tokio::test]
async fn resync_without_remote_reports_not_configured() {
    let ctx = unconfigured();
    ctx.coordinator.load_initial_data().await;

    let (report, hydration) = ctx.coordinator.resync().await.unwrap();

    assert_eq!(report, ConnectionReport::not_configured());
    assert_eq!(hydration, Hydration::LOCAL);
    assert_eq!(ctx.coordinator.status().indicator, Indicator::Offline);
}

#[tokio::test]
async fn resync_picks_up_remote_changes() {
    let ctx = hydrated_remote().await;
    let mut changed = sample_projects();
    changed[0].progress = 99;
    ctx.remote.seed(changed, Vec::new());

    let (report, hydration) = ctx.coordinator.resync().await.unwrap();

    assert!(report.success);
    assert!(hydration.any_remote());
    assert_eq!(ctx.coordinator.snapshot().projects[0].progress, 99);
    assert_eq!(ctx.local().load_projects().data[0].progress, 99);
    assert_eq!(ctx.coordinator.phase(), SyncPhase::RemoteAuthoritative);
}

#[tokio::test]
async fn resync_flushes_pending_edits_first() {
    let ctx = hydrated_remote().await;
    ctx.coordinator.update(|d| d.set_progress("4", 12)).unwrap();

    ctx.coordinator.resync().await.unwrap();

    let calls = ctx.remote.calls();
    assert!(matches!(calls[0], RemoteCall::PushProjects(_)));
    assert_eq!(calls.iter().position(|c| *c == RemoteCall::Probe), Some(2));
    assert_eq!(ctx.coordinator.snapshot().project("4").map(|p| p.progress), Some(12));
    assert!(!ctx.coordinator.status().pending_push);
}

#[tokio::test]
async fn resync_fetch_error_leaves_record_set_untouched() {
    let ctx = hydrated_remote().await;
    let before = ctx.coordinator.snapshot();
    ctx.remote.set_fetch_error(Some(RemoteError::PermissionDenied("rls".into())));

    let err = ctx.coordinator.resync().await.unwrap_err();

    assert_eq!(err.code().as_deref(), Some("PERMISSION_DENIED"));
    assert_eq!(ctx.coordinator.snapshot(), before);
    let status = ctx.coordinator.status();
    assert_eq!(status.phase, SyncPhase::RemoteAuthoritative);
    assert_eq!(status.indicator, Indicator::Error);
    assert_eq!(
        ctx.remote.calls(),
        vec![RemoteCall::Probe, RemoteCall::Fetch(Table::Projects)]
    );
}

#[tokio::test]
async fn resync_with_failed_probe_falls_back_to_local() {
    let ctx = hydrated_remote().await;
    ctx.coordinator.update(|d| d.add_project("nova", "")).unwrap();
    ctx.coordinator.flush_now().await;
    ctx.remote.set_probe_error(Some(RemoteError::Network("refused".into())));

    let (report, hydration) = ctx.coordinator.resync().await.unwrap();

    assert!(!report.success);
    assert_eq!(report.code.as_deref(), Some("FETCH_ERROR"));
    assert_eq!(hydration, Hydration::LOCAL);
    assert_eq!(ctx.coordinator.snapshot().projects.len(), 5);
    assert_eq!(ctx.coordinator.phase(), SyncPhase::LocalAuthoritative);
}

#[tokio::test]
async fn test_connection_result_is_kept_in_status() {
    let ctx = configured();
    ctx.remote.set_probe_error(Some(RemoteError::MissingTables("projects".into())));

    let report = ctx.coordinator.test_connection().await;

    assert_eq!(report.code.as_deref(), Some("MISSING_TABLES"));
    assert_eq!(ctx.coordinator.status().connection, Some(report));
}

#[tokio::test]
async fn configure_swaps_the_remote_handle() {
    let ctx = unconfigured();
    ctx.coordinator.load_initial_data().await;

    assert!(ctx.coordinator.configure("https://obras.example.co/", "anon-key").unwrap());

    assert!(ctx.coordinator.is_configured());
    assert_eq!(ctx.local().load_credentials(), ctx.coordinator.credentials());
    assert!(ctx.coordinator.test_connection().await.success);
}

#[tokio::test]
async fn configure_with_invalid_credentials_disconnects() {
    let ctx = configured();
    ctx.coordinator.load_initial_data().await;
    ctx.coordinator.update(|d| d.add_project("fiji", "")).unwrap();

    assert!(!ctx.coordinator.configure("not a url", "anon-key").unwrap());

    assert!(!ctx.coordinator.is_configured());
    assert_eq!(ctx.coordinator.flush_now().await, None);
    assert_eq!(
        ctx.local().load_credentials().map(|c| c.endpoint),
        Some("not a url".to_string())
    );
}
