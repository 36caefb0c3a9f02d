//! # Metrics Registry
//!
//! Prometheus metrics registry setup and registration.

use anyhow::Result;
use prometheus::{Encoder, Registry, TextEncoder};
use std::sync::LazyLock;

/// Global Prometheus metrics registry
pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Register all metrics with the Prometheus registry
///
/// Call once at start-up. Prometheus metrics internally use Arc, so the
/// registry holds cheap clones of the statics.
///
/// # Errors
///
/// Returns an error if a metric is registered twice.
pub fn register_metrics() -> Result<()> {
    super::cache_metrics::register_cache_metrics()?;
    super::upstream_metrics::register_upstream_metrics()?;
    Ok(())
}

/// Encode every registered metric in the Prometheus text format
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn gather_metrics() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
