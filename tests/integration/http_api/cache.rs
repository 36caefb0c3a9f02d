//! Cache invalidation endpoints

use super::common::spawn_app;
use axum::http::StatusCode;

#[tokio::test]
async fn test_invalidate_one_secret() {
    let app = spawn_app();
    app.store.put_text("a", "1");
    app.store.put_text("b", "2");
    app.server.get("/secrets/a").await.assert_status_ok();
    app.server.get("/secrets/b").await.assert_status_ok();

    app.server
        .delete("/secrets/a/cache")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server.get("/secrets/a").await.assert_status_ok();
    app.server.get("/secrets/b").await.assert_status_ok();
    assert_eq!(app.store.get_calls("a"), 2);
    assert_eq!(app.store.get_calls("b"), 1);
}

#[tokio::test]
async fn test_invalidate_unknown_secret_is_a_no_op() {
    let app = spawn_app();

    app.server
        .delete("/secrets/never-cached/cache")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(app.store.total_get_calls(), 0);
}

#[tokio::test]
async fn test_invalidate_all() {
    let app = spawn_app();
    app.store.put_text("a", "1");
    app.store.put_text("b", "2");
    app.server.get("/secrets/a").await.assert_status_ok();
    app.server.get("/secrets/b").await.assert_status_ok();

    app.server
        .delete("/secrets/cache")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server.get("/secrets/a").await.assert_status_ok();
    app.server.get("/secrets/b").await.assert_status_ok();
    assert_eq!(app.store.total_get_calls(), 4);
}
