// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::{SyncConfig, SyncPhase};
use ob_adapters::{FakeRemoteConnector, FakeRemoteStore};
use ob_core::test_support::{sample_employees, sample_projects};
use ob_core::{RemoteCredentials, SystemClock};
use ob_storage::{LocalStore, MemoryKvStore};
use std::time::Duration;

type Coordinator = SyncCoordinator<MemoryKvStore, FakeRemoteConnector, SystemClock>;

fn setup(window: Duration) -> (Arc<Coordinator>, FakeRemoteStore) {
    let local = LocalStore::new(MemoryKvStore::new());
    local.save_credentials(&RemoteCredentials::new("https://obras.example.co", "anon-key")).unwrap();
    let remote = FakeRemoteStore::with_rows(sample_projects(), sample_employees());
    let connector = FakeRemoteConnector::new(remote.clone());
    let config = SyncConfig::default().with_debounce(window);
    (Arc::new(SyncCoordinator::new(local, connector, SystemClock, config)), remote)
}

async fn wait_for(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(tokio::time::Instant::now() < deadline, "condition not reached");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn driver_pushes_once_the_window_elapses() {
    let (coordinator, remote) = setup(Duration::from_millis(50));
    coordinator.load_initial_data().await;
    let cancel = CancellationToken::new();
    let task = tokio::spawn(Arc::clone(&coordinator).run(cancel.clone()));

    coordinator.update(|d| d.set_progress("1", 77)).unwrap();
    wait_for(|| remote.push_count() > 0).await;

    assert_eq!(remote.projects()[0].progress, 77);
    assert_eq!(remote.push_count(), 2);
    assert!(!coordinator.status().pending_push);

    cancel.cancel();
    task.await.unwrap();
}

#[tokio::test]
async fn driver_coalesces_rapid_edits() {
    let (coordinator, remote) = setup(Duration::from_millis(200));
    coordinator.load_initial_data().await;
    let cancel = CancellationToken::new();
    let task = tokio::spawn(Arc::clone(&coordinator).run(cancel.clone()));

    for percent in [10, 20, 30] {
        coordinator.update(|d| d.set_progress("2", percent)).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    wait_for(|| remote.push_count() > 0).await;
    wait_for(|| coordinator.phase() != SyncPhase::Syncing).await;

    assert_eq!(remote.push_count(), 2);
    assert_eq!(remote.projects()[1].progress, 30);

    cancel.cancel();
    task.await.unwrap();
}

#[tokio::test]
async fn cancellation_flushes_pending_push() {
    let (coordinator, remote) = setup(Duration::from_secs(60));
    coordinator.load_initial_data().await;
    let cancel = CancellationToken::new();
    let task = tokio::spawn(Arc::clone(&coordinator).run(cancel.clone()));

    coordinator.update(|d| d.add_project("nova", "Centro")).unwrap();
    cancel.cancel();
    task.await.unwrap();

    assert_eq!(remote.projects().len(), 5);
    assert!(!coordinator.status().pending_push);
}

#[tokio::test]
async fn idle_driver_never_pushes() {
    let (coordinator, remote) = setup(Duration::from_millis(10));
    coordinator.load_initial_data().await;
    let cancel = CancellationToken::new();
    let task = tokio::spawn(Arc::clone(&coordinator).run(cancel.clone()));

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();
    task.await.unwrap();

    assert_eq!(remote.push_count(), 0);
}
