//! # Initialization
//!
//! Gateway start-up logic including tracing, rustls setup, metrics
//! registration and construction of the retrieval service.

use crate::cache::SecretCache;
use crate::config::GatewayConfig;
use crate::observability;
use crate::provider::aws::AwsSecretManager;
use crate::provider::SecretStoreProvider;
use crate::secrets::SecretService;
use crate::server::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Initialization result containing all components needed to serve
#[derive(Debug)]
pub struct InitializationResult {
    /// Effective configuration
    pub config: GatewayConfig,
    /// Handler state wrapping the retrieval service
    pub state: AppState,
}

/// Initialize the gateway runtime
///
/// This function handles:
/// - Tracing subscriber setup
/// - rustls crypto provider setup
/// - Metrics registration
/// - AWS Secrets Manager client creation
/// - Cache and service construction
///
/// # Errors
///
/// Returns an error if metrics registration fails.
pub async fn initialize(config: GatewayConfig) -> Result<InitializationResult> {
    observability::logging::init_tracing();

    // Required for rustls 0.23+ when no default provider is set via features
    // Must happen before the SDK builds its HTTPS client
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider was already installed");
    }

    info!("Starting Secret Cache Gateway v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: bind={}:{}, region={}, cache_ttl={}s",
        config.server.host, config.server.port, config.aws.region, config.server.cache_ttl_secs
    );

    observability::metrics::register_metrics().context("Failed to register metrics")?;

    let provider: Arc<dyn SecretStoreProvider> = Arc::new(AwsSecretManager::new(&config.aws).await);
    let state = build_state(provider, &config);

    Ok(InitializationResult { config, state })
}

/// Build handler state around `provider` with a cache sized by `config`
pub fn build_state(provider: Arc<dyn SecretStoreProvider>, config: &GatewayConfig) -> AppState {
    let cache = SecretCache::new(config.server.cache_ttl());
    AppState::new(SecretService::new(provider, cache))
}

/// Resolve when the process receives Ctrl-C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
