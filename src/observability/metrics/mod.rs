//! # Metrics Module
//!
//! Prometheus metrics for monitoring the gateway, organized by responsibility.
//!
//! ## Sub-modules
//!
//! - `registry` - Metrics registry setup, registration and text encoding
//! - `cache_metrics` - Cache hits, misses, size and coalesced fetches
//! - `upstream_metrics` - Upstream secret store request counts and latency

pub mod cache_metrics;
pub mod registry;
pub mod upstream_metrics;

pub use cache_metrics::*;
pub use registry::*;
pub use upstream_metrics::*;
