// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error carrying a process exit code.
//!
//! Commands return `ExitError` rather than exiting so `main()` owns process
//! termination. An empty message means the command already explained itself.

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Exit with `code` without printing anything further
    pub fn silent(code: i32) -> Self {
        Self::new(code, String::new())
    }
}
