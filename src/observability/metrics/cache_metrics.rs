//! # Cache Metrics
//!
//! Metrics for the secret cache: hits, misses, size and coalesced fetches.

use crate::observability::metrics::registry::REGISTRY;
use anyhow::Result;
use prometheus::{IntCounter, IntGauge};
use std::sync::LazyLock;

static CACHE_HITS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "secret_cache_hits_total",
        "Total number of fetches served from the cache",
    )
    .expect("Failed to create CACHE_HITS_TOTAL metric - this should never happen")
});

static CACHE_MISSES_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "secret_cache_misses_total",
        "Total number of cache-enabled fetches that had to go upstream",
    )
    .expect("Failed to create CACHE_MISSES_TOTAL metric - this should never happen")
});

static CACHE_ENTRIES: LazyLock<IntGauge> = LazyLock::new(|| {
    IntGauge::new(
        "secret_cache_entries",
        "Current number of cached secrets, fresh or stale",
    )
    .expect("Failed to create CACHE_ENTRIES metric - this should never happen")
});

static COALESCED_FETCHES_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "secret_coalesced_fetches_total",
        "Total number of fetches that joined an in-flight upstream request",
    )
    .expect("Failed to create COALESCED_FETCHES_TOTAL metric - this should never happen")
});

/// Register cache metrics with the registry
pub(crate) fn register_cache_metrics() -> Result<()> {
    REGISTRY.register(Box::new(CACHE_HITS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(CACHE_MISSES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(CACHE_ENTRIES.clone()))?;
    REGISTRY.register(Box::new(COALESCED_FETCHES_TOTAL.clone()))?;
    Ok(())
}

pub fn increment_cache_hits() {
    CACHE_HITS_TOTAL.inc();
}

pub fn increment_cache_misses() {
    CACHE_MISSES_TOTAL.inc();
}

pub fn increment_coalesced_fetches() {
    COALESCED_FETCHES_TOTAL.inc();
}

pub fn set_cache_entries(count: usize) {
    CACHE_ENTRIES.set(i64::try_from(count).unwrap_or(i64::MAX));
}
