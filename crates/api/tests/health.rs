//! Integration tests for the health and ping endpoints and general HTTP
//! behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, dir.path()).await;
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ping_reports_app_env(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, dir.path()).await;
    let response = get(app, "/api/v1/ping").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "test");
    assert!(json["server_ip"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, dir.path()).await;
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, dir.path()).await;
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36, "x-request-id should be a UUID");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cors_preflight_allows_any_origin(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, dir.path()).await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/clients")
        .header("Origin", "https://example.org")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "authorization")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert!(headers.get("access-control-allow-credentials").is_none());
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("POST"), "Allow-Methods should contain POST, got: {methods}");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stored_images_are_served_statically(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, dir.path()).await;
    std::fs::write(dir.path().join("gallery").join("1_Opening.png"), common::PNG).unwrap();

    let response = get(app.clone(), "/api/v1/images/gallery/1_Opening.png").await;
    assert_eq!(response.status(), StatusCode::OK);

    let missing = get(app, "/api/v1/images/gallery/404_Nope.png").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
