//! `POST /secrets/batch`

use super::common::spawn_app;
use axum::body::Bytes;
use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_batch_isolates_failures() {
    let app = spawn_app();
    app.store.put_text("A", r#"{"k":"v"}"#);

    let response = app
        .server
        .post("/secrets/batch")
        .json(&json!({"names": ["A", "B"]}))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "secrets": {"A": {"k": "v"}},
            "errors": {"B": "Secret 'B' not found"}
        })
    );
}

#[tokio::test]
async fn test_batch_without_failures_omits_errors() {
    let app = spawn_app();
    app.store.put_text("A", "1");
    app.store.put_text("B", "2");

    let response = app
        .server
        .post("/secrets/batch")
        .json(&json!({"names": ["A", "B"]}))
        .await;

    let body = response.json::<Value>();
    assert_eq!(body, json!({"secrets": {"A": "1", "B": "2"}}));
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_batch_use_cache_false_bypasses_cache() {
    let app = spawn_app();
    app.store.put_text("A", "1");

    let request = json!({"names": ["A"]});
    app.server.post("/secrets/batch").json(&request).await.assert_status_ok();
    app.server.post("/secrets/batch").json(&request).await.assert_status_ok();
    assert_eq!(app.store.get_calls("A"), 1);

    app.server
        .post("/secrets/batch")
        .json(&json!({"names": ["A"], "useCache": false}))
        .await
        .assert_status_ok();
    assert_eq!(app.store.get_calls("A"), 2);
}

#[tokio::test]
async fn test_batch_rejects_bad_names_without_upstream_calls() {
    let app = spawn_app();

    let bodies = [
        json!({}),
        json!({"names": []}),
        json!({"names": "A"}),
        json!({"names": null}),
        json!({"names": ["A", 7]}),
    ];

    for body in bodies {
        let response = app.server.post("/secrets/batch").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"]["statusCode"],
            400,
            "{body} should be rejected"
        );
    }

    assert_eq!(app.store.total_get_calls(), 0);
}

#[tokio::test]
async fn test_batch_rejects_malformed_json() {
    let app = spawn_app();

    let response = app
        .server
        .post("/secrets/batch")
        .bytes(Bytes::from_static(b"{\"names\": ["))
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.store.total_get_calls(), 0);
}
