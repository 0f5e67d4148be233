// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use ob_adapters::RemoteError;
use ob_core::DomainError;
use ob_storage::StorageError;
use thiserror::Error;

/// Errors that cross the coordinator boundary.
///
/// Background push failures never surface here; they are recorded in
/// [`crate::SyncStatus`] instead.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),
    #[error("local storage error: {0}")]
    Storage(#[from] StorageError),
}

impl SyncError {
    /// Stable code for display; domain errors have none.
    pub fn code(&self) -> Option<String> {
        match self {
            SyncError::Domain(_) => None,
            SyncError::Remote(e) => Some(e.code()),
            SyncError::Storage(_) => Some(crate::status::LOCAL_WRITE_FAILED.to_string()),
        }
    }
}
