// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ob-engine: Local/remote synchronization for the obras record set

mod config;
mod coordinator;
mod debounce;
mod driver;
pub mod env;
mod error;
mod status;

pub use config::SyncConfig;
pub use coordinator::{Hydration, PushOutcome, Source, SyncCoordinator};
pub use debounce::Debouncer;
pub use error::SyncError;
pub use status::{Indicator, LastError, SyncPhase, SyncStatus, LOCAL_WRITE_FAILED};
