//! `GET /secrets` and `GET /secrets/{name}`

use super::common::{spawn_app, TTL};
use axum::http::StatusCode;
use secret_cache_gateway::provider::UpstreamError;
use serde_json::{json, Value};
use std::time::Duration;

#[tokio::test]
async fn test_get_structured_secret() {
    let app = spawn_app();
    app.store.put_text("db-creds", r#"{"user":"a","pass":"b"}"#);

    let response = app.server.get("/secrets/db-creds").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"name": "db-creds", "value": {"user": "a", "pass": "b"}})
    );
}

#[tokio::test]
async fn test_get_raw_secret() {
    let app = spawn_app();
    app.store.put_text("api-key", "sk_live_123");

    let response = app.server.get("/secrets/api-key").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"name": "api-key", "value": "sk_live_123"})
    );
}

#[tokio::test]
async fn test_second_get_within_ttl_is_served_from_cache() {
    let app = spawn_app();
    app.store.put_text("db-creds", r#"{"user":"a","pass":"b"}"#);

    app.server.get("/secrets/db-creds").await.assert_status_ok();
    app.clock.advance(TTL - Duration::from_secs(1));
    let second = app.server.get("/secrets/db-creds").await;

    second.assert_status_ok();
    assert_eq!(second.json::<Value>()["value"], json!({"user": "a", "pass": "b"}));
    assert_eq!(app.store.get_calls("db-creds"), 1);

    app.clock.advance(Duration::from_secs(1));
    app.server.get("/secrets/db-creds").await.assert_status_ok();
    assert_eq!(app.store.get_calls("db-creds"), 2);
}

#[tokio::test]
async fn test_use_cache_false_goes_upstream() {
    let app = spawn_app();
    app.store.put_text("token", "old");
    app.server.get("/secrets/token").await.assert_status_ok();

    app.store.put_text("token", "new");
    let response = app
        .server
        .get("/secrets/token")
        .add_query_param("useCache", "false")
        .await;

    assert_eq!(response.json::<Value>()["value"], "new");
    assert_eq!(app.store.get_calls("token"), 2);

    // Anything other than the literal `false` keeps the cache on
    app.server
        .get("/secrets/token")
        .add_query_param("useCache", "no")
        .await
        .assert_status_ok();
    assert_eq!(app.store.get_calls("token"), 2);
}

#[tokio::test]
async fn test_name_is_url_decoded() {
    let app = spawn_app();
    app.store.put_text("prod/db password", "s3cret");

    let response = app.server.get("/secrets/prod%2Fdb%20password").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "prod/db password");
    assert_eq!(app.store.get_calls("prod/db password"), 1);
}

#[tokio::test]
async fn test_missing_secret_is_404_with_envelope() {
    let app = spawn_app();

    let response = app.server.get("/secrets/missing").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": {"message": "Secret 'missing' not found", "statusCode": 404}})
    );
}

#[tokio::test]
async fn test_upstream_error_kinds_map_to_statuses() {
    let app = spawn_app();
    app.store
        .fail_with("locked", UpstreamError::AccessDenied("not authorized".to_string()));
    app.store
        .fail_with("garbled", UpstreamError::DecryptionFailure("kms".to_string()));
    app.store
        .fail_with("flaky", UpstreamError::Other("Rate exceeded".to_string()));

    let locked = app.server.get("/secrets/locked").await;
    locked.assert_status(StatusCode::FORBIDDEN);
    let message = locked.json::<Value>()["error"]["message"].clone();
    assert!(message.as_str().is_some_and(|m| m.contains("'locked'")));

    let garbled = app.server.get("/secrets/garbled").await;
    garbled.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        garbled.json::<Value>()["error"],
        json!({"message": "Failed to decrypt secret 'garbled'", "statusCode": 500})
    );

    let flaky = app.server.get("/secrets/flaky").await;
    flaky.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        flaky.json::<Value>()["error"]["message"],
        "Failed to retrieve secret 'flaky': Rate exceeded"
    );
}

#[tokio::test]
async fn test_secret_named_like_a_static_route() {
    let app = spawn_app();
    app.store.put_text("batch", "not-a-route");

    let response = app.server.get("/secrets/batch").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"name": "batch", "value": "not-a-route"})
    );
}

#[tokio::test]
async fn test_list_secrets() {
    let app = spawn_app();
    for name in ["alpha", "beta", "gamma"] {
        app.store.put_text(name, "x");
    }

    let response = app.server.get("/secrets").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["count"], 3);
    assert_eq!(body["secrets"][0]["Name"], "alpha");
    assert!(body["secrets"][0]["ARN"].is_string());

    let limited = app
        .server
        .get("/secrets")
        .add_query_param("maxResults", "2")
        .await;
    assert_eq!(limited.json::<Value>()["count"], 2);
    assert_eq!(app.store.list_calls(), 2);
}

#[tokio::test]
async fn test_list_access_denied_is_403() {
    let app = spawn_app();
    app.store
        .fail_list_with(UpstreamError::AccessDenied("no ListSecrets".to_string()));

    let response = app.server.get("/secrets").await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["error"]["statusCode"], 403);
}

#[tokio::test]
async fn test_list_failure_is_500() {
    let app = spawn_app();
    app.store
        .fail_list_with(UpstreamError::Other("service unavailable".to_string()));

    let response = app.server.get("/secrets").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Failed to list secrets: service unavailable"
    );
}
