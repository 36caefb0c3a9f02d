//! # HTTP Server
//!
//! Axum router exposing the retrieval layer:
//!
//! - `GET /secrets` - list secret metadata
//! - `GET /secrets/{name}` - fetch one secret
//! - `POST /secrets/batch` - fetch several secrets
//! - `DELETE /secrets/{name}/cache`, `DELETE /secrets/cache` - invalidate
//! - `GET /health`, `GET /metrics`
//! - `GET /swagger-ui`, `GET /api-docs/openapi.json`

pub mod docs;
pub mod error;
mod handlers;

pub use error::ApiError;

use crate::config::ServerConfig;
use crate::secrets::SecretService;
use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use std::future::Future;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: SecretService,
}

impl AppState {
    pub fn new(service: SecretService) -> Self {
        Self { service }
    }
}

/// Build the application router
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/secrets", get(handlers::list_secrets))
        .route(
            "/secrets/batch",
            post(handlers::batch_secrets).get(handlers::get_secret_on_static_route),
        )
        .route(
            "/secrets/cache",
            delete(handlers::invalidate_all).get(handlers::get_secret_on_static_route),
        )
        .route("/secrets/{name}", get(handlers::get_secret))
        .route("/secrets/{name}/cache", delete(handlers::invalidate_secret))
        .merge(docs::docs_router())
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                ))
                .layer(cors_layer(&config.cors_allowed_origins)),
        )
        .with_state(state)
}

/// CORS policy: any origin when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}

/// Bind and serve until `shutdown` resolves
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn start_server<F>(config: &ServerConfig, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_addr()?;
    let app = build_router(state, config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {addr}"))?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}
