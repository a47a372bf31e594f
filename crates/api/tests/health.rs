//! HTTP-level behaviour: health endpoint, 404 fallback, request IDs, CORS.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_endpoint_reports_ok(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    // The test binary is built from the same package, so the baked-in
    // version must match exactly.
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_path_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/no/such/route").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn every_response_carries_a_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/health").await;

    let header = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header missing")
        .to_str()
        .unwrap();
    uuid::Uuid::parse_str(header).expect("x-request-id should be a UUID");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_the_configured_origin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/events")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(preflight).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    let origin = &headers["access-control-allow-origin"];
    assert_eq!(origin, "http://localhost:5173");

    let credentials = &headers["access-control-allow-credentials"];
    assert_eq!(credentials, "true");

    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(
        methods.contains("GET"),
        "expected GET in allow-methods, got: {methods}"
    );
}
