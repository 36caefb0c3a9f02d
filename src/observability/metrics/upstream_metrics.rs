//! # Upstream Metrics
//!
//! Metrics for calls to the upstream secret store.

use crate::observability::metrics::registry::REGISTRY;
use anyhow::Result;
use prometheus::{HistogramVec, IntCounterVec};
use std::sync::LazyLock;
use std::time::Duration;

static UPSTREAM_REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "secret_upstream_requests_total",
            "Total number of requests to the upstream secret store",
        ),
        &["operation", "outcome"],
    )
    .expect("Failed to create UPSTREAM_REQUESTS_TOTAL metric - this should never happen")
});

static UPSTREAM_REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "secret_upstream_request_duration_seconds",
            "Duration of upstream secret store requests in seconds",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        &["operation"],
    )
    .expect("Failed to create UPSTREAM_REQUEST_DURATION metric - this should never happen")
});

/// Register upstream metrics with the registry
pub(crate) fn register_upstream_metrics() -> Result<()> {
    REGISTRY.register(Box::new(UPSTREAM_REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(UPSTREAM_REQUEST_DURATION.clone()))?;
    Ok(())
}

/// Record one upstream request
///
/// `outcome` is `success` or an `UpstreamError` label.
pub fn observe_upstream_request(operation: &str, outcome: &str, elapsed: Duration) {
    UPSTREAM_REQUESTS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
    UPSTREAM_REQUEST_DURATION
        .with_label_values(&[operation])
        .observe(elapsed.as_secs_f64());
}
