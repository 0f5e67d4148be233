// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction so debounce windows and sync timestamps can be driven
//! deterministically in tests.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// A source of monotonic time (for deadlines) and wall time (for display)
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    fn epoch_ms(&self) -> u64;
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
    }
}

#[derive(Debug)]
struct FakeTime {
    instant: Instant,
    epoch_ms: u64,
}

/// Fake clock for testing; clones share the same timeline.
#[derive(Clone, Debug)]
pub struct FakeClock {
    time: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self { time: Arc::new(Mutex::new(FakeTime { instant: Instant::now(), epoch_ms: 1_000_000 })) }
    }

    /// Move both timelines forward
    pub fn advance(&self, duration: Duration) {
        let mut time = self.time.lock();
        time.instant += duration;
        time.epoch_ms += duration.as_millis() as u64;
    }

    /// Shorthand for `advance(Duration::from_millis(ms))`
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn set_epoch_ms(&self, ms: u64) {
        self.time.lock().epoch_ms = ms;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.time.lock().instant
    }

    fn epoch_ms(&self) -> u64 {
        self.time.lock().epoch_ms
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
