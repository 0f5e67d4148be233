// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote connection settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a pair of credentials cannot be used to build a client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("endpoint is empty")]
    MissingEndpoint,
    #[error("endpoint must start with http:// or https:// (got {0:?})")]
    InvalidScheme(String),
    #[error("access key is empty")]
    MissingKey,
}

/// Endpoint URL + access key for the hosted store.
///
/// Persisted as `{ "endpoint": ..., "key": ... }`; the older `url` field
/// name is accepted when reading.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCredentials {
    #[serde(alias = "url", default)]
    pub endpoint: String,
    #[serde(default)]
    pub key: String,
}

impl RemoteCredentials {
    pub fn new(endpoint: impl Into<String>, key: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into().trim().to_string(), key: key.into().trim().to_string() }
    }

    /// Syntactic check only; never touches the network.
    pub fn validate(&self) -> Result<(), CredentialsError> {
        if self.endpoint.is_empty() {
            return Err(CredentialsError::MissingEndpoint);
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(CredentialsError::InvalidScheme(self.endpoint.clone()));
        }
        if self.key.is_empty() {
            return Err(CredentialsError::MissingKey);
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Endpoint without trailing slashes
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    /// Key with everything but the last four characters hidden
    pub fn masked_key(&self) -> String {
        let visible: String =
            self.key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
        if self.key.chars().count() <= 4 {
            return "*".repeat(self.key.chars().count());
        }
        format!("****{visible}")
    }
}

// Never print the key
impl std::fmt::Debug for RemoteCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCredentials")
            .field("endpoint", &self.endpoint)
            .field("key", &self.masked_key())
            .finish()
    }
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
