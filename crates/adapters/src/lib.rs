// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O

pub mod remote;

pub use remote::{
    ConnectionReport, HttpConnector, HttpRemoteStore, RemoteConnector, RemoteError, RemoteStore,
    Table, DEFAULT_REMOTE_TIMEOUT, SETUP_SQL,
};

#[cfg(any(test, feature = "test-support"))]
pub use remote::{FakeRemoteConnector, FakeRemoteStore, RemoteCall};
