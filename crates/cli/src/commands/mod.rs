// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod employee;
pub mod project;
pub mod remote;
pub mod status;
pub mod sync;

use anyhow::Result;
use ob_adapters::HttpConnector;
use ob_core::{Dataset, DomainError, SystemClock};
use ob_engine::{SyncConfig, SyncCoordinator};
use ob_storage::{FileKvStore, LocalStore};

use crate::output::report_push;

pub type Coordinator = SyncCoordinator<FileKvStore, HttpConnector, SystemClock>;

/// Build a coordinator over the on-disk store. Nothing is hydrated yet.
pub fn open() -> Result<Coordinator> {
    let dir = crate::env::state_dir()?;
    let config = SyncConfig::from_env();
    tracing::debug!(state_dir = %dir.display(), ?config, "opening local store");
    let local = LocalStore::new(FileKvStore::new(dir));
    Ok(SyncCoordinator::new(local, HttpConnector::new(config.remote_timeout), SystemClock, config))
}

/// Hydrated coordinator, for read-only commands
pub async fn open_hydrated() -> Result<Coordinator> {
    let coordinator = open()?;
    coordinator.load_initial_data().await;
    Ok(coordinator)
}

/// Hydrate, apply one edit, and push it before returning.
pub async fn mutate<T>(op: impl FnOnce(&mut Dataset) -> Result<T, DomainError>) -> Result<T> {
    let coordinator = open_hydrated().await?;
    let value = coordinator.update(op)?;
    report_push(coordinator.flush_now().await.as_ref());
    Ok(value)
}
