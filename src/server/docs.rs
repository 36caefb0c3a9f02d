//! # API Documentation
//!
//! OpenAPI description of the HTTP surface, served with Swagger UI at
//! `/swagger-ui` and as JSON at `/api-docs/openapi.json`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Secret Cache Gateway",
        description = "AWS Secrets Manager behind an in-process TTL cache"
    ),
    paths(
        super::handlers::health,
        super::handlers::metrics_handler,
        super::handlers::list_secrets,
        super::handlers::get_secret,
        super::handlers::batch_secrets,
        super::handlers::invalidate_secret,
        super::handlers::invalidate_all
    ),
    components(schemas(
        super::handlers::HealthResponse,
        super::handlers::ListSecretsResponse,
        super::handlers::SecretResponse,
        super::handlers::BatchRequest,
        super::error::ErrorBody,
        super::error::ErrorDetail,
        crate::provider::SecretMetadata,
        crate::secrets::BatchResult
    )),
    tags(
        (name = "secrets", description = "Secret listing and retrieval"),
        (name = "cache", description = "Cache invalidation"),
        (name = "operations", description = "Health and metrics")
    )
)]
pub struct ApiDoc;

/// Router serving Swagger UI and the OpenAPI document
pub fn docs_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
