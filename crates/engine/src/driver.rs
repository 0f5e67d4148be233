// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background task that performs debounced pushes.
//!
//! For hosts that keep a coordinator alive across many edits. The `ob`
//! binary applies one edit per process and calls `flush_now` instead, so it
//! never spawns this task.

use crate::SyncCoordinator;
use ob_adapters::RemoteConnector;
use ob_core::Clock;
use ob_storage::KvStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

impl<K, R, C> SyncCoordinator<K, R, C>
where
    K: KvStore,
    R: RemoteConnector,
    C: Clock,
{
    /// Sleep until the next push deadline and push, until cancelled.
    ///
    /// On cancellation any pending snapshot is pushed before returning.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        tracing::debug!("sync driver started");
        loop {
            let deadline = self.next_deadline();
            let wait = deadline
                .map(|d| d.saturating_duration_since(self.clock().now()))
                .unwrap_or_default();

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.woken() => {}
                _ = tokio::time::sleep(wait), if deadline.is_some() => {
                    self.flush_due().await;
                }
            }
        }

        if let Some(outcome) = self.flush_now().await {
            tracing::info!(?outcome, "final push on shutdown");
        }
        tracing::debug!("sync driver stopped");
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
