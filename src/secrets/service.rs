//! # Secret Service
//!
//! Fetches secrets from the upstream store, memoizes successful results in the
//! `SecretCache` and maps failures to `SecretError`.
//!
//! ## Coalescing
//!
//! Concurrent fetches that miss the cache for the same name share a single
//! upstream request. The first caller spawns the request as its own task and
//! registers a shared handle to it keyed by name; later callers clone and
//! await that handle. The request runs to completion even if every waiter is
//! cancelled. The marker is dropped when the task ends, so a failure is never
//! remembered beyond the callers that were already waiting for it.

use super::{decode_payload, SecretError, SecretValue};
use crate::cache::SecretCache;
use crate::observability::metrics;
use crate::provider::{SecretMetadata, SecretStoreProvider};
use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::debug;
use utoipa::ToSchema;

type SharedFetch = Shared<BoxFuture<'static, Result<SecretValue, SecretError>>>;

/// Outcome of a batch fetch
///
/// Every requested name lands in exactly one of the two maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct BatchResult {
    /// Decoded values of the names that succeeded
    #[schema(value_type = Object)]
    pub secrets: BTreeMap<String, SecretValue>,
    /// Error messages of the names that failed
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

/// Caching secret retrieval service
///
/// Cheap to clone; clones share the cache and the in-flight table.
#[derive(Clone)]
pub struct SecretService {
    inner: Arc<Inner>,
}

struct Inner {
    provider: Arc<dyn SecretStoreProvider>,
    cache: SecretCache,
    in_flight: Mutex<HashMap<String, SharedFetch>>,
}

impl std::fmt::Debug for SecretService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretService")
            .field("provider", &self.inner.provider.provider_name())
            .field("ttl", &self.inner.cache.ttl())
            .field("cached", &self.inner.cache.len())
            .finish_non_exhaustive()
    }
}

impl SecretService {
    /// Create a service reading from `provider` and memoizing into `cache`
    pub fn new(provider: Arc<dyn SecretStoreProvider>, cache: SecretCache) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                cache,
                in_flight: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Fetch the value of secret `name`
    ///
    /// With `use_cache`, a fresh cached value is returned without contacting
    /// upstream. Otherwise, or on a miss, the secret is fetched, decoded and
    /// written to the cache. A failed fetch leaves the cache untouched.
    ///
    /// # Errors
    ///
    /// Returns the `SecretError` kind matching the upstream failure, or
    /// `EmptySecret` when upstream returned no value.
    pub async fn fetch(&self, name: &str, use_cache: bool) -> Result<SecretValue, SecretError> {
        if use_cache {
            if let Some(value) = self.inner.cache.get_fresh(name) {
                debug!(secret.name = name, "Cache hit");
                metrics::increment_cache_hits();
                return Ok(value);
            }
            debug!(secret.name = name, "Cache miss");
            metrics::increment_cache_misses();
        } else {
            debug!(secret.name = name, "Cache bypassed");
        }

        self.join_or_start(name).await
    }

    /// List secret metadata, at most `max_results` records
    ///
    /// Always a live call; listings are not cached.
    ///
    /// # Errors
    ///
    /// Returns `ListAccessDenied` on permission errors, `ListFailed` otherwise.
    pub async fn list(&self, max_results: i32) -> Result<Vec<SecretMetadata>, SecretError> {
        let started = Instant::now();
        let result = self.inner.provider.list_secrets(max_results).await;
        metrics::observe_upstream_request(
            "list_secrets",
            result.as_ref().map_or_else(|e| e.as_str(), |_| "success"),
            started.elapsed(),
        );
        result.map_err(SecretError::from_list)
    }

    /// Fetch every name in `names` concurrently
    ///
    /// All fetches run to completion; one name failing never affects another.
    pub async fn fetch_many(&self, names: &[String], use_cache: bool) -> BatchResult {
        let fetches = names.iter().map(|name| async move {
            let result = self.fetch(name, use_cache).await;
            (name, result)
        });

        let mut batch = BatchResult::default();
        for (name, result) in join_all(fetches).await {
            match result {
                Ok(value) => {
                    batch.secrets.insert(name.clone(), value);
                }
                Err(e) => {
                    batch.errors.insert(name.clone(), e.to_string());
                }
            }
        }
        batch
    }

    /// Drop the cached value for `name`, if any
    pub fn invalidate(&self, name: &str) {
        self.inner.cache.remove(name);
        metrics::set_cache_entries(self.inner.cache.len());
    }

    /// Drop every cached value
    pub fn invalidate_all(&self) {
        self.inner.cache.clear();
        metrics::set_cache_entries(0);
    }

    /// Number of cached entries, fresh or stale
    pub fn cached_len(&self) -> usize {
        self.inner.cache.len()
    }

    /// Name of the upstream provider
    pub fn provider_name(&self) -> &'static str {
        self.inner.provider.provider_name()
    }

    fn join_or_start(&self, name: &str) -> SharedFetch {
        let mut in_flight = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = in_flight.get(name) {
            debug!(secret.name = name, "Joining in-flight fetch");
            metrics::increment_coalesced_fetches();
            return existing.clone();
        }

        let marker = InFlightMarker {
            inner: Arc::clone(&self.inner),
            name: name.to_string(),
        };
        // The task owns the marker, so the slot is freed on completion, panic
        // or runtime shutdown alike
        let task = tokio::spawn(async move { marker.inner.fetch_upstream(&marker.name).await });

        let key = name.to_string();
        let fetch = async move {
            task.await.unwrap_or_else(|e| {
                Err(SecretError::RetrievalFailed {
                    name: key,
                    message: e.to_string(),
                })
            })
        }
        .boxed()
        .shared();

        in_flight.insert(name.to_string(), fetch.clone());
        fetch
    }
}

impl Inner {
    async fn fetch_upstream(&self, name: &str) -> Result<SecretValue, SecretError> {
        let started = Instant::now();
        let result = self.provider.get_secret_value(name).await;
        metrics::observe_upstream_request(
            "get_secret_value",
            result.as_ref().map_or_else(|e| e.as_str(), |_| "success"),
            started.elapsed(),
        );

        let payload = result.map_err(|e| SecretError::from_fetch(name, e))?;
        let value = decode_payload(name, &payload)?;

        self.cache.insert(name, value.clone());
        metrics::set_cache_entries(self.cache.len());
        Ok(value)
    }

}

/// Owns the in-flight slot of one upstream request and frees it on drop
struct InFlightMarker {
    inner: Arc<Inner>,
    name: String,
}

impl Drop for InFlightMarker {
    fn drop(&mut self) {
        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.name);
    }
}
