// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! PostgREST client for the hosted tables.
//!
//! Rows live at `{endpoint}/rest/v1/{table}`. Every request carries the
//! access key both as `apikey` and as a bearer token.

use super::{RemoteConnector, RemoteError, RemoteStore, Table};
use async_trait::async_trait;
use ob_core::{Employee, Project, RemoteCredentials};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Per-request timeout when none is configured
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

const UPSERT_PREFER: &str = "resolution=merge-duplicates,return=minimal";

#[derive(Clone)]
pub struct HttpRemoteStore {
    client: reqwest::Client,
    rest_url: String,
}

impl HttpRemoteStore {
    pub fn new(credentials: &RemoteCredentials, timeout: Duration) -> Result<Self, RemoteError> {
        credentials.validate()?;

        let invalid_key = |_| RemoteError::Config("access key is not a valid header value".into());
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&credentials.key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", credentials.key)).map_err(invalid_key)?,
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| RemoteError::Config(e.to_string()))?;

        Ok(Self { client, rest_url: format!("{}/rest/v1", credentials.base_url()) })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/{}", self.rest_url, table.as_str())
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: Table,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, RemoteError> {
        let response = self.client.get(self.table_url(table)).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RemoteError::from_response(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let rows: Option<Vec<T>> =
            serde_json::from_str(&body).map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(rows.unwrap_or_default())
    }

    async fn upsert<T: Serialize + Sync>(&self, table: Table, rows: &[T]) -> Result<(), RemoteError> {
        if rows.is_empty() {
            return Ok(());
        }
        tracing::debug!(table = table.as_str(), rows = rows.len(), "upserting");
        let response = self
            .client
            .post(self.table_url(table))
            .query(&[("on_conflict", "id")])
            .header("Prefer", UPSERT_PREFER)
            .json(rows)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::from_response(status.as_u16(), &body))
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn probe(&self) -> Result<(), RemoteError> {
        self.select::<serde_json::Value>(Table::Projects, &[("select", "id"), ("limit", "1")])
            .await
            .map(|_| ())
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, RemoteError> {
        self.select(Table::Projects, &[("select", "*"), ("order", "created_at.desc")]).await
    }

    async fn fetch_employees(&self) -> Result<Vec<Employee>, RemoteError> {
        self.select(Table::Employees, &[("select", "*")]).await
    }

    async fn push_projects(&self, projects: &[Project]) -> Result<(), RemoteError> {
        self.upsert(Table::Projects, projects).await
    }

    async fn push_employees(&self, employees: &[Employee]) -> Result<(), RemoteError> {
        self.upsert(Table::Employees, employees).await
    }
}

/// Builds [`HttpRemoteStore`] handles with a fixed request timeout
#[derive(Debug, Clone, Copy)]
pub struct HttpConnector {
    timeout: Duration,
}

impl HttpConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self::new(DEFAULT_REMOTE_TIMEOUT)
    }
}

impl RemoteConnector for HttpConnector {
    type Store = HttpRemoteStore;

    fn connect(&self, credentials: &RemoteCredentials) -> Result<HttpRemoteStore, RemoteError> {
        HttpRemoteStore::new(credentials, self.timeout)
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
