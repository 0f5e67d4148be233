// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trailing-edge debounce deadline.
//!
//! The caller supplies the current instant, so the same logic runs against
//! the system clock or a fake one.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, deadline: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// (Re)arm: the deadline moves to `now + window`, superseding any
    /// earlier one.
    pub fn touch(&mut self, now: Instant) -> Instant {
        let deadline = now + self.window;
        self.deadline = Some(deadline);
        deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Disarm and return true if the deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// Disarm regardless of the deadline; true if it was armed.
    pub fn take(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
