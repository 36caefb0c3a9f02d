//! # Logging
//!
//! Tracing subscriber setup.

use crate::constants::DEFAULT_LOG_FILTER;
use tracing::warn;

/// Install the global fmt subscriber
///
/// The filter comes from `RUST_LOG` when set. Installing twice (tests, or an
/// embedding application that already set a subscriber) is not an error.
pub fn init_tracing() {
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .try_init()
    {
        warn!("Tracing subscriber already initialized: {}", e);
    }
}
