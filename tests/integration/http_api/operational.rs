//! Health, metrics, headers and fallback routing

use super::common::{spawn_app, spawn_app_with};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use secret_cache_gateway::config::ServerConfig;
use serde_json::Value;

#[tokio::test]
async fn test_health() {
    let app = spawn_app();

    let response = app.server.get("/health").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "secret-cache-gateway");
    assert_eq!(body["provider"], "in-memory");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_metrics_endpoint_serves_text() {
    let app = spawn_app();

    let response = app.server.get("/metrics").await;
    response.assert_status_ok();
    let content_type = response.header("content-type");
    assert!(content_type
        .to_str()
        .is_ok_and(|v| v.starts_with("text/plain")));
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let app = spawn_app();

    for path in ["/health", "/secrets/missing", "/nowhere"] {
        let response = app.server.get(path).await;
        assert_eq!(response.header("x-content-type-options"), "nosniff");
        assert_eq!(response.header("x-frame-options"), "DENY");
        assert_eq!(response.header("referrer-policy"), "no-referrer");
    }
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let app = spawn_app();

    let response = app.server.get("/nowhere").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["statusCode"], 404);
}

#[tokio::test]
async fn test_cors_restricted_to_configured_origins() {
    let config = ServerConfig {
        cors_allowed_origins: vec!["https://console.example.com".to_string()],
        ..ServerConfig::default()
    };
    let app = spawn_app_with(&config);

    let allowed = app
        .server
        .get("/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://console.example.com"),
        )
        .await;
    assert_eq!(
        allowed.header("access-control-allow-origin"),
        "https://console.example.com"
    );

    let denied = app
        .server
        .get("/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://evil.example.com"),
        )
        .await;
    assert!(denied
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = spawn_app();

    let response = app.server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();
    let doc = response.json::<Value>();
    assert!(doc["openapi"].as_str().is_some_and(|v| v.starts_with("3.")));
    assert!(doc["paths"]["/secrets/{name}"]["get"].is_object());
    assert!(doc["paths"]["/secrets/batch"]["post"].is_object());
    assert!(doc["components"]["schemas"]["BatchResult"].is_object());
}
