// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ob-storage: Local persistence for the obras dashboard

mod kv;
mod local;

pub use kv::{FileKvStore, KvStore, MemoryKvStore};
pub use local::{
    LocalStore, Loaded, StorageError, EMPLOYEES_KEY, PROJECTS_KEY, REMOTE_CONFIG_KEY,
};
