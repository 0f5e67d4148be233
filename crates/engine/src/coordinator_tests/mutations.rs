// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-through and push scheduling on mutation

use super::*;
use crate::{Indicator, LOCAL_WRITE_FAILED};

#[tokio::test]
async fn mutation_is_written_through_before_returning() {
    let ctx = hydrated_remote().await;

    let created = ctx.coordinator.update(|d| d.add_project("nova", "Centro")).unwrap();

    let cached = ctx.local().load_projects().data;
    assert_eq!(cached.last().map(|p| &p.id), Some(&created.id));
    assert_eq!(ctx.local().load_dataset().data, ctx.coordinator.snapshot());
    assert!(push_calls(&ctx.remote).is_empty());
}

#[tokio::test]
async fn mutation_arms_push_when_configured() {
    let ctx = configured();
    ctx.coordinator.load_initial_data().await;

    ctx.coordinator.update(|d| d.add_employee("ana", "servente", None)).unwrap();

    assert!(ctx.coordinator.status().pending_push);
    assert!(ctx.coordinator.next_deadline().is_some());
}

#[tokio::test]
async fn mutation_without_remote_never_schedules_a_push() {
    let ctx = unconfigured();
    ctx.coordinator.load_initial_data().await;

    ctx.coordinator.update(|d| d.add_project("fiji", "")).unwrap();
    ctx.advance_past_window();

    assert!(!ctx.coordinator.status().pending_push);
    assert_eq!(ctx.coordinator.flush_due().await, None);
    assert_eq!(ctx.coordinator.flush_now().await, None);
}

#[tokio::test]
async fn rejected_operation_changes_nothing() {
    let ctx = hydrated_remote().await;
    let before = ctx.coordinator.snapshot();

    let err = ctx.coordinator.update(|d| d.set_progress("missing", 50)).unwrap_err();

    assert!(matches!(err, SyncError::Domain(DomainError::ProjectNotFound(_))));
    assert_eq!(err.code(), None);
    assert_eq!(ctx.coordinator.snapshot(), before);
    assert!(!ctx.coordinator.status().pending_push);
}

#[tokio::test]
async fn failed_local_write_is_reported_in_status() {
    let ctx = unconfigured();
    ctx.coordinator.load_initial_data().await;
    ctx.kv.set_fail_writes(true);

    let created = ctx.coordinator.update(|d| d.add_project("fiji", "")).unwrap();

    assert_eq!(ctx.coordinator.snapshot().projects[0].id, created.id);
    let status = ctx.coordinator.status();
    assert_eq!(status.last_error.map(|e| e.code).as_deref(), Some(LOCAL_WRITE_FAILED));
    assert_eq!(status.indicator, Indicator::Offline);

    ctx.kv.set_fail_writes(false);
    ctx.coordinator.save_local().unwrap();
    assert_eq!(ctx.local().load_projects().data.len(), 1);
}

#[tokio::test]
async fn push_keeps_local_write_failure_visible() {
    let ctx = hydrated_remote().await;
    ctx.kv.set_fail_writes(true);

    ctx.coordinator.update(|d| d.add_project("nova", "Centro")).unwrap();
    ctx.advance_past_window();
    assert!(matches!(ctx.coordinator.flush_due().await, Some(PushOutcome::Pushed { .. })));

    let status = ctx.coordinator.status();
    assert!(status.last_synced_ms.is_some());
    assert_eq!(status.last_error.map(|e| e.code).as_deref(), Some(LOCAL_WRITE_FAILED));
    assert_eq!(status.indicator, Indicator::Error);
    assert_eq!(ctx.local().load_projects().data.len(), 4);
}

#[tokio::test]
async fn next_write_through_clears_local_write_failure() {
    let ctx = hydrated_remote().await;
    ctx.kv.set_fail_writes(true);
    ctx.coordinator.update(|d| d.add_project("nova", "Centro")).unwrap();

    ctx.kv.set_fail_writes(false);
    ctx.coordinator.update(|d| d.set_progress("1", 40)).unwrap();

    assert_eq!(ctx.coordinator.status().last_error, None);
    assert_eq!(ctx.local().load_dataset().data, ctx.coordinator.snapshot());
}

#[tokio::test]
async fn delete_project_cascades_through_both_collections() {
    let ctx = hydrated_remote().await;
    ctx.coordinator.update(|d| d.assign_employee("e1", Some("2"))).unwrap();

    ctx.coordinator.update(|d| d.delete_project("2")).unwrap();

    let cached = ctx.local().load_dataset().data;
    assert!(cached.project("2").is_none());
    assert_eq!(cached.employee("e1").and_then(|e| e.project_id.clone()), None);
}

#[tokio::test]
async fn with_data_reads_without_cloning() {
    let ctx = hydrated_remote().await;
    let stats = ctx.coordinator.with_data(|d| d.stats());
    assert_eq!(stats.total(), 4);
}
