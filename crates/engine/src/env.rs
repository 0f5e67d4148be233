// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the sync engine.

use std::time::Duration;

fn duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.trim().parse::<u64>().ok()).map(Duration::from_millis)
}

/// Debounce window for remote pushes (default 1.5s, `OB_DEBOUNCE_MS`).
pub fn debounce_window() -> Duration {
    duration_ms("OB_DEBOUNCE_MS").unwrap_or(Duration::from_millis(1_500))
}

/// Per-request remote timeout (default 10s, `OB_REMOTE_TIMEOUT_MS`).
pub fn remote_timeout() -> Duration {
    duration_ms("OB_REMOTE_TIMEOUT_MS").unwrap_or(ob_adapters::DEFAULT_REMOTE_TIMEOUT)
}
