// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ob_adapters::{FakeRemoteConnector, FakeRemoteStore, RemoteCall};
use ob_core::test_support::{sample_employees, sample_projects};
use ob_core::FakeClock;
use ob_storage::MemoryKvStore;
use std::sync::Arc;
use std::time::Duration;

mod mutations;
mod properties;
mod push;
mod resync;
mod startup;

const WINDOW_MS: u64 = 1_500;

type TestCoordinator = SyncCoordinator<MemoryKvStore, FakeRemoteConnector, FakeClock>;

struct TestContext {
    coordinator: Arc<TestCoordinator>,
    kv: MemoryKvStore,
    remote: FakeRemoteStore,
    connector: FakeRemoteConnector,
    clock: FakeClock,
}

impl TestContext {
    fn local(&self) -> LocalStore<MemoryKvStore> {
        LocalStore::new(self.kv.clone())
    }

    fn advance_past_window(&self) {
        self.clock.advance_ms(WINDOW_MS);
    }
}

fn config() -> SyncConfig {
    SyncConfig::default().with_debounce(Duration::from_millis(WINDOW_MS))
}

/// Coordinator over a local store prepared by `seed`, optionally with saved
/// credentials pointing at a shared fake remote.
fn build(configured: bool, seed: impl FnOnce(&LocalStore<MemoryKvStore>)) -> TestContext {
    let kv = MemoryKvStore::new();
    let local = LocalStore::new(kv.clone());
    seed(&local);
    if configured {
        local
            .save_credentials(&RemoteCredentials::new("https://obras.example.co", "anon-key"))
            .unwrap();
    }
    let remote = FakeRemoteStore::new();
    let connector = FakeRemoteConnector::new(remote.clone());
    let clock = FakeClock::new();
    let coordinator = Arc::new(SyncCoordinator::new(local, connector.clone(), clock.clone(), config()));
    TestContext { coordinator, kv, remote, connector, clock }
}

fn unconfigured() -> TestContext {
    build(false, |_| {})
}

fn configured() -> TestContext {
    build(true, |_| {})
}

/// Configured, with `local` records cached and `remote` rows on the server
fn with_data(local: Dataset, remote: Dataset) -> TestContext {
    let ctx = build(true, |store| store.save_dataset(&local).unwrap());
    ctx.remote.seed(remote.projects, remote.employees);
    ctx
}

/// Configured and hydrated from a remote holding the sample records
async fn hydrated_remote() -> TestContext {
    let ctx = with_data(Dataset::default(), Dataset::new(sample_projects(), sample_employees()));
    ctx.coordinator.load_initial_data().await;
    ctx.remote.clear_calls();
    ctx
}

fn push_calls(remote: &FakeRemoteStore) -> Vec<RemoteCall> {
    remote
        .calls()
        .into_iter()
        .filter(|c| matches!(c, RemoteCall::PushProjects(_) | RemoteCall::PushEmployees(_)))
        .collect()
}
