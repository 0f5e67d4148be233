// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::env;
use std::time::Duration;

/// Tunables for the synchronization coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Quiet period after the last mutation before a push
    pub debounce_window: Duration,
    /// Per-request timeout for remote calls
    pub remote_timeout: Duration,
}

impl SyncConfig {
    pub fn from_env() -> Self {
        Self { debounce_window: env::debounce_window(), remote_timeout: env::remote_timeout() }
    }

    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_window: Duration::from_millis(1_500),
            remote_timeout: ob_adapters::DEFAULT_REMOTE_TIMEOUT,
        }
    }
}
