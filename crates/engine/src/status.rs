// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronization status as shown to the user.

use ob_adapters::{ConnectionReport, RemoteError};
use serde::{Deserialize, Serialize};

/// Which side currently holds the authoritative record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    #[default]
    Uninitialized,
    Loading,
    LocalAuthoritative,
    RemoteAuthoritative,
    Syncing,
}

ob_core::simple_display! {
    SyncPhase {
        Uninitialized => "uninitialized",
        Loading => "loading",
        LocalAuthoritative => "local",
        RemoteAuthoritative => "remote",
        Syncing => "syncing",
    }
}

/// Single-word summary for a status light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Offline,
    Configured,
    Connected,
    Syncing,
    Error,
}

ob_core::simple_display! {
    Indicator {
        Offline => "offline",
        Configured => "configured",
        Connected => "connected",
        Syncing => "syncing",
        Error => "error",
    }
}

/// Most recent failure at the coordinator boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastError {
    pub code: String,
    pub message: String,
    pub at_ms: u64,
}

impl LastError {
    pub fn remote(err: &RemoteError, at_ms: u64) -> Self {
        Self { code: err.code(), message: err.to_string(), at_ms }
    }

    /// The local copy is behind memory until a write-through succeeds
    pub fn is_local_write(&self) -> bool {
        self.code == LOCAL_WRITE_FAILED
    }
}

/// Code recorded when a local write-through fails
pub const LOCAL_WRITE_FAILED: &str = "LOCAL_WRITE_FAILED";

/// Point-in-time view of the coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub phase: SyncPhase,
    pub configured: bool,
    pub indicator: Indicator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<ConnectionReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<LastError>,
    pub local_corrupt: bool,
    pub pending_push: bool,
}

impl SyncStatus {
    /// Derive the indicator from the other fields
    pub fn indicator_for(
        phase: SyncPhase,
        configured: bool,
        connection: Option<&ConnectionReport>,
        last_error: Option<&LastError>,
    ) -> Indicator {
        if phase == SyncPhase::Syncing {
            return Indicator::Syncing;
        }
        if !configured {
            return Indicator::Offline;
        }
        if last_error.is_some() || connection.is_some_and(|c| !c.success) {
            return Indicator::Error;
        }
        if phase == SyncPhase::RemoteAuthoritative {
            Indicator::Connected
        } else {
            Indicator::Configured
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
