// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Debounced push tests

use super::*;
use crate::{Indicator, SyncPhase};
use ob_core::ProjectStatus;

#[tokio::test]
async fn push_waits_for_the_window() {
    let ctx = hydrated_remote().await;
    ctx.coordinator.update(|d| d.set_progress("1", 70)).unwrap();

    ctx.clock.advance_ms(WINDOW_MS - 1);
    assert_eq!(ctx.coordinator.flush_due().await, None);

    ctx.clock.advance_ms(1);
    let outcome = ctx.coordinator.flush_due().await;

    assert_eq!(outcome, Some(PushOutcome::Pushed { projects: 4, employees: 2 }));
    assert_eq!(ctx.remote.projects()[0].progress, 70);
    assert!(!ctx.coordinator.status().pending_push);
}

#[tokio::test]
async fn edits_within_one_window_coalesce_into_one_push() {
    let ctx = hydrated_remote().await;

    ctx.coordinator.update(|d| d.set_progress("1", 20)).unwrap();
    ctx.clock.advance_ms(500);
    ctx.coordinator.update(|d| d.set_progress("1", 30)).unwrap();

    // The first deadline has passed but the second edit moved it.
    ctx.clock.advance_ms(1_200);
    assert_eq!(ctx.coordinator.flush_due().await, None);

    ctx.clock.advance_ms(300);
    ctx.coordinator.flush_due().await;
    ctx.advance_past_window();
    assert_eq!(ctx.coordinator.flush_due().await, None);

    assert_eq!(push_calls(&ctx.remote).len(), 2);
    assert_eq!(ctx.remote.projects()[0].progress, 30);
}

#[tokio::test]
async fn two_windows_yield_two_pushes_with_their_own_snapshots() {
    let ctx = hydrated_remote().await;

    ctx.coordinator.update(|d| d.set_status("3", ProjectStatus::InProgress)).unwrap();
    ctx.clock.advance_ms(400);
    ctx.coordinator.update(|d| d.set_progress("3", 25)).unwrap();
    ctx.advance_past_window();
    ctx.coordinator.flush_due().await;
    let first = ctx.remote.projects()[2].clone();

    ctx.coordinator.update(|d| d.set_progress("3", 60)).unwrap();
    ctx.advance_past_window();
    ctx.coordinator.flush_due().await;

    let projects_pushes = ctx
        .remote
        .calls()
        .into_iter()
        .filter(|c| matches!(c, RemoteCall::PushProjects(_)))
        .count();
    assert_eq!(projects_pushes, 2);
    assert_eq!((first.status, first.progress), (ProjectStatus::InProgress, 25));
    assert_eq!(ctx.remote.projects()[2].progress, 60);
}

#[tokio::test]
async fn push_sends_projects_then_employees() {
    let ctx = hydrated_remote().await;
    ctx.coordinator.update(|d| d.add_employee("ana", "servente", None)).unwrap();
    ctx.advance_past_window();
    ctx.coordinator.flush_due().await;

    let calls = push_calls(&ctx.remote);
    assert!(matches!(calls[0], RemoteCall::PushProjects(ref ids) if ids.len() == 4));
    assert!(matches!(calls[1], RemoteCall::PushEmployees(ref ids) if ids.len() == 3));
}

#[tokio::test]
async fn successful_push_records_sync_time() {
    let ctx = hydrated_remote().await;
    ctx.coordinator.update(|d| d.set_progress("1", 90)).unwrap();
    ctx.advance_past_window();
    ctx.coordinator.flush_due().await;

    let status = ctx.coordinator.status();
    assert_eq!(status.last_synced_ms, Some(ctx.clock.epoch_ms()));
    assert_eq!(status.phase, SyncPhase::RemoteAuthoritative);
    assert_eq!(status.indicator, Indicator::Connected);
}

#[tokio::test]
async fn failed_push_is_dropped_and_reported() {
    let ctx = hydrated_remote().await;
    ctx.remote.set_push_error(Some(RemoteError::Timeout));
    ctx.coordinator.update(|d| d.set_progress("1", 90)).unwrap();
    ctx.advance_past_window();

    let outcome = ctx.coordinator.flush_due().await;

    assert_eq!(outcome, Some(PushOutcome::Failed(RemoteError::Timeout)));
    let status = ctx.coordinator.status();
    assert_eq!(status.indicator, Indicator::Error);
    assert_eq!(status.last_error.map(|e| e.code).as_deref(), Some("TIMEOUT"));
    assert!(!status.pending_push);
    assert_eq!(status.phase, SyncPhase::RemoteAuthoritative);
    // The edit is still in memory and cached locally.
    assert_eq!(ctx.local().load_projects().data[0].progress, 90);

    // No retry until the next edit.
    ctx.advance_past_window();
    assert_eq!(ctx.coordinator.flush_due().await, None);

    ctx.remote.set_push_error(None);
    ctx.coordinator.update(|d| d.set_progress("1", 91)).unwrap();
    ctx.advance_past_window();
    ctx.coordinator.flush_due().await;
    assert_eq!(ctx.remote.projects()[0].progress, 91);
    assert!(ctx.coordinator.status().last_error.is_none());
}

#[tokio::test]
async fn edit_during_push_waits_for_a_fresh_window() {
    let ctx = hydrated_remote().await;
    let gate = ctx.remote.hold_pushes();
    ctx.coordinator.update(|d| d.set_progress("1", 40)).unwrap();
    ctx.advance_past_window();

    let in_flight = {
        let coordinator = Arc::clone(&ctx.coordinator);
        tokio::spawn(async move { coordinator.flush_due().await })
    };
    while ctx.coordinator.phase() != SyncPhase::Syncing {
        tokio::task::yield_now().await;
    }
    assert_eq!(ctx.coordinator.status().indicator, Indicator::Syncing);

    ctx.coordinator.update(|d| d.set_progress("1", 45)).unwrap();
    assert_eq!(ctx.coordinator.next_deadline(), None);
    assert_eq!(ctx.coordinator.flush_due().await, None);

    gate.add_permits(2);
    let first = in_flight.await.unwrap();
    assert_eq!(first, Some(PushOutcome::Pushed { projects: 4, employees: 2 }));
    assert_eq!(ctx.remote.projects()[0].progress, 40);

    assert!(ctx.coordinator.status().pending_push);
    ctx.advance_past_window();
    gate.add_permits(2);
    ctx.coordinator.flush_due().await;
    assert_eq!(ctx.remote.projects()[0].progress, 45);
}

#[tokio::test]
async fn flush_now_skips_the_window() {
    let ctx = hydrated_remote().await;
    ctx.coordinator.update(|d| d.set_progress("2", 55)).unwrap();

    let outcome = ctx.coordinator.flush_now().await;

    assert!(matches!(outcome, Some(PushOutcome::Pushed { .. })));
    assert_eq!(ctx.remote.projects()[1].progress, 55);
    assert_eq!(ctx.coordinator.flush_now().await, None);
}

#[tokio::test]
async fn flush_now_waits_for_a_running_push() {
    let ctx = hydrated_remote().await;
    let gate = ctx.remote.hold_pushes();
    ctx.coordinator.update(|d| d.set_progress("1", 10)).unwrap();
    ctx.advance_past_window();

    let in_flight = {
        let coordinator = Arc::clone(&ctx.coordinator);
        tokio::spawn(async move { coordinator.flush_due().await })
    };
    while ctx.coordinator.phase() != SyncPhase::Syncing {
        tokio::task::yield_now().await;
    }
    ctx.coordinator.update(|d| d.set_progress("1", 11)).unwrap();

    let flushing = {
        let coordinator = Arc::clone(&ctx.coordinator);
        tokio::spawn(async move { coordinator.flush_now().await })
    };
    gate.add_permits(4);

    in_flight.await.unwrap();
    assert!(matches!(flushing.await.unwrap(), Some(PushOutcome::Pushed { .. })));
    assert_eq!(ctx.remote.projects()[0].progress, 11);
}

#[tokio::test]
async fn reconfigured_handle_is_used_for_the_next_push() {
    let ctx = configured();
    ctx.coordinator.load_initial_data().await;

    assert!(ctx.coordinator.configure("https://other.example.co", "new-key").unwrap());
    ctx.coordinator.update(|d| d.add_project("fiji", "")).unwrap();
    ctx.coordinator.flush_now().await;

    let connected = ctx.connector.connected();
    assert_eq!(connected.last().map(|c| c.endpoint.as_str()), Some("https://other.example.co"));
    assert_eq!(ctx.remote.projects().len(), 1);
}
