//! # HTTP Handlers
//!
//! Request parsing and response shaping for the secret endpoints.

use super::error::{ApiError, ErrorBody};
use super::AppState;
use crate::constants::{DEFAULT_LIST_MAX_RESULTS, MAX_LIST_MAX_RESULTS, SERVICE_NAME};
use crate::observability::metrics;
use crate::provider::SecretMetadata;
use crate::secrets::{BatchResult, SecretValue};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct ListQuery {
    /// Page size, 1 to 100 (default 100)
    #[serde(rename = "maxResults")]
    #[param(value_type = Option<i32>)]
    max_results: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct SecretQuery {
    /// `false` bypasses the cache; any other value uses it
    #[serde(rename = "useCache")]
    #[param(value_type = Option<bool>)]
    use_cache: Option<String>,
}

/// Batch request body
///
/// Both fields are kept loosely typed so that shape errors surface as 400
/// with a specific message rather than a generic deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct BatchRequest {
    /// Secret names to fetch
    #[schema(value_type = Vec<String>)]
    names: Option<Value>,
    /// `false` bypasses the cache
    #[serde(rename = "useCache")]
    #[schema(value_type = Option<bool>)]
    use_cache: Option<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub provider: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListSecretsResponse {
    pub secrets: Vec<SecretMetadata>,
    pub count: usize,
}

/// One decoded secret
#[derive(Debug, Serialize, ToSchema)]
pub struct SecretResponse {
    pub name: String,
    /// JSON value when the secret parsed as JSON, otherwise a string
    #[schema(value_type = Object)]
    pub value: SecretValue,
}

/// Page size for a list request
///
/// Missing, unparsable or non-positive values use the default; larger
/// values are capped at the upstream maximum.
pub(crate) fn parse_max_results(raw: Option<&str>) -> i32 {
    match raw.and_then(|v| v.trim().parse::<i32>().ok()) {
        Some(n) if n > 0 => n.min(MAX_LIST_MAX_RESULTS),
        _ => DEFAULT_LIST_MAX_RESULTS,
    }
}

/// Only the literal `false` disables the cache
pub(crate) fn parse_use_cache(raw: Option<&str>) -> bool {
    raw != Some("false")
}

/// Validate the `names` field of a batch request
pub(crate) fn parse_batch_names(names: Option<&Value>) -> Result<Vec<String>, ApiError> {
    let items = match names {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            return Err(ApiError::BadRequest(
                "Request body must include a non-empty 'names' array".to_string(),
            ))
        }
    };

    items
        .iter()
        .map(|item| {
            item.as_str().map(ToString::to_string).ok_or_else(|| {
                ApiError::BadRequest("Every entry in 'names' must be a string".to_string())
            })
        })
        .collect()
}

/// `GET /health`
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "operations"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.service.provider_name().to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// `GET /metrics`
#[utoipa::path(
    get,
    path = "/metrics",
    responses((status = 200, description = "Prometheus text exposition", body = String, content_type = "text/plain")),
    tag = "operations"
)]
pub async fn metrics_handler() -> Result<Response, ApiError> {
    let body = metrics::gather_metrics().map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}

/// `GET /secrets?maxResults=N`
#[utoipa::path(
    get,
    path = "/secrets",
    params(ListQuery),
    responses(
        (status = 200, description = "Secret metadata, never cached", body = ListSecretsResponse),
        (status = 403, description = "Not allowed to list secrets", body = ErrorBody),
        (status = 500, description = "Upstream failure", body = ErrorBody),
    ),
    tag = "secrets"
)]
pub async fn list_secrets(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListSecretsResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let max_results = parse_max_results(query.max_results.as_deref());

    let secrets = state.service.list(max_results).await?;
    info!(count = secrets.len(), max_results, "Listed secrets");
    Ok(Json(ListSecretsResponse {
        count: secrets.len(),
        secrets,
    }))
}

/// `GET /secrets/{name}?useCache=true|false`
#[utoipa::path(
    get,
    path = "/secrets/{name}",
    params(
        ("name" = String, Path, description = "Secret name, URL-encoded"),
        SecretQuery,
    ),
    responses(
        (status = 200, description = "Decoded secret value", body = SecretResponse),
        (status = 403, description = "Access denied", body = ErrorBody),
        (status = 404, description = "Secret not found", body = ErrorBody),
        (status = 500, description = "Decryption, empty value or upstream failure", body = ErrorBody),
    ),
    tag = "secrets"
)]
pub async fn get_secret(
    State(state): State<AppState>,
    Path(name): Path<String>,
    query: Result<Query<SecretQuery>, QueryRejection>,
) -> Result<Json<SecretResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    fetch_one(&state, name, parse_use_cache(query.use_cache.as_deref())).await
}

/// `GET` on a path that is also a static route (`/secrets/batch`, `/secrets/cache`)
///
/// Such names are still valid secret names; the last path segment is the name.
pub async fn get_secret_on_static_route(
    State(state): State<AppState>,
    uri: Uri,
    query: Result<Query<SecretQuery>, QueryRejection>,
) -> Result<Json<SecretResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let name = uri
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    fetch_one(&state, name, parse_use_cache(query.use_cache.as_deref())).await
}

async fn fetch_one(
    state: &AppState,
    name: String,
    use_cache: bool,
) -> Result<Json<SecretResponse>, ApiError> {
    let value = state.service.fetch(&name, use_cache).await?;
    Ok(Json(SecretResponse { name, value }))
}

/// `POST /secrets/batch`
#[utoipa::path(
    post,
    path = "/secrets/batch",
    request_body = BatchRequest,
    responses(
        (status = 200, description = "Per-name values and errors", body = BatchResult),
        (status = 400, description = "Missing, empty or malformed names", body = ErrorBody),
    ),
    tag = "secrets"
)]
pub async fn batch_secrets(
    State(state): State<AppState>,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResult>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let names = parse_batch_names(body.names.as_ref())?;
    let use_cache = !matches!(body.use_cache, Some(Value::Bool(false)));

    let batch = state.service.fetch_many(&names, use_cache).await;
    info!(
        requested = names.len(),
        succeeded = batch.secrets.len(),
        failed = batch.errors.len(),
        "Batch fetch complete"
    );
    Ok(Json(batch))
}

/// `DELETE /secrets/{name}/cache`
#[utoipa::path(
    delete,
    path = "/secrets/{name}/cache",
    params(("name" = String, Path, description = "Secret name, URL-encoded")),
    responses((status = 204, description = "Cache entry dropped, if present")),
    tag = "cache"
)]
pub async fn invalidate_secret(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> StatusCode {
    state.service.invalidate(&name);
    info!(secret.name = %name, "Cache entry invalidated");
    StatusCode::NO_CONTENT
}

/// `DELETE /secrets/cache`
#[utoipa::path(
    delete,
    path = "/secrets/cache",
    responses((status = 204, description = "Cache emptied")),
    tag = "cache"
)]
pub async fn invalidate_all(State(state): State<AppState>) -> StatusCode {
    state.service.invalidate_all();
    info!("Cache cleared");
    StatusCode::NO_CONTENT
}

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route {} not found", uri.path()))
}
