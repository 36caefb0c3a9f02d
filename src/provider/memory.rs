//! # In-Memory Secret Store
//!
//! `SecretStoreProvider` backed by a map, with per-operation call counters,
//! injectable failures and an optional artificial latency. Used by the test
//! suites to observe how often the retrieval layer reaches upstream.

use super::{SecretMetadata, SecretStoreProvider, UpstreamError, UpstreamPayload};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory secret store
#[derive(Debug, Default)]
pub struct InMemorySecretStore {
    secrets: DashMap<String, UpstreamPayload>,
    failures: DashMap<String, UpstreamError>,
    list_failure: Mutex<Option<UpstreamError>>,
    latency: Option<Duration>,
    get_calls: DashMap<String, usize>,
    list_calls: AtomicUsize,
}

impl InMemorySecretStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Store a `SecretString`
    pub fn put_text(&self, name: &str, value: &str) {
        self.secrets
            .insert(name.to_string(), UpstreamPayload::text(value));
    }

    /// Store a `SecretBinary`
    pub fn put_binary(&self, name: &str, value: &[u8]) {
        self.secrets
            .insert(name.to_string(), UpstreamPayload::binary(value));
    }

    /// Store a raw payload, including one with neither field set
    pub fn put_payload(&self, name: &str, payload: UpstreamPayload) {
        self.secrets.insert(name.to_string(), payload);
    }

    /// Make reads of `name` fail with `error`
    pub fn fail_with(&self, name: &str, error: UpstreamError) {
        self.failures.insert(name.to_string(), error);
    }

    /// Stop failing reads of `name`
    pub fn clear_failure(&self, name: &str) {
        self.failures.remove(name);
    }

    /// Make `list_secrets` fail with `error`
    pub fn fail_list_with(&self, error: UpstreamError) {
        *self
            .list_failure
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(error);
    }

    /// Number of `get_secret_value` calls made for `name`
    pub fn get_calls(&self, name: &str) -> usize {
        self.get_calls.get(name).map_or(0, |c| *c)
    }

    /// Number of `get_secret_value` calls made for any name
    pub fn total_get_calls(&self) -> usize {
        self.get_calls.iter().map(|c| *c.value()).sum()
    }

    /// Number of `list_secrets` calls made
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl SecretStoreProvider for InMemorySecretStore {
    async fn get_secret_value(&self, secret_id: &str) -> Result<UpstreamPayload, UpstreamError> {
        *self.get_calls.entry(secret_id.to_string()).or_insert(0) += 1;
        self.simulate_latency().await;

        if let Some(error) = self.failures.get(secret_id) {
            return Err(error.value().clone());
        }
        self.secrets
            .get(secret_id)
            .map(|p| p.value().clone())
            .ok_or_else(|| {
                UpstreamError::NotFound(
                    "Secrets Manager can't find the specified secret.".to_string(),
                )
            })
    }

    async fn list_secrets(&self, max_results: i32) -> Result<Vec<SecretMetadata>, UpstreamError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if let Some(error) = self
            .list_failure
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        let mut names: Vec<String> = self.secrets.iter().map(|e| e.key().clone()).collect();
        names.sort();
        let limit = usize::try_from(max_results.max(0)).unwrap_or(0);
        Ok(names
            .into_iter()
            .take(limit)
            .map(|name| SecretMetadata {
                arn: Some(format!(
                    "arn:aws:secretsmanager:us-east-1:000000000000:secret:{name}"
                )),
                name: Some(name),
                description: None,
                last_changed_date: Some(Utc::now()),
            })
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "in-memory"
    }
}
