//! `AppError` rendering: status codes, machine-readable codes, body shape.
//!
//! No server involved; `IntoResponse` is exercised directly on error values.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use encuentro_api::error::AppError;
use encuentro_core::error::CoreError;
use http_body_util::BodyExt;
use uuid::Uuid;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn message_variants_map_to_their_status_and_code() {
    let cases: Vec<(AppError, StatusCode, &str, &str)> = vec![
        (
            AppError::validation("Event name is required"),
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Event name is required",
        ),
        (
            AppError::conflict("You are already registered for this event"),
            StatusCode::CONFLICT,
            "CONFLICT",
            "You are already registered for this event",
        ),
        (
            AppError::unauthorized("Invalid or expired token"),
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Invalid or expired token",
        ),
        (
            AppError::forbidden("You are not allowed to update this event"),
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "You are not allowed to update this event",
        ),
        (
            AppError::BadRequest("invalid query parameter".into()),
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            "invalid query parameter",
        ),
    ];

    for (err, want_status, want_code, want_message) in cases {
        let (status, json) = render(err).await;
        assert_eq!(status, want_status);
        assert_eq!(json["code"], want_code);
        assert_eq!(json["error"], want_message);
    }
}

#[tokio::test]
async fn not_found_renders_entity_and_id() {
    let id = Uuid::new_v4();
    let err = AppError::not_found("Event", id);

    let (status, json) = render(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], format!("Event with id {id} not found"));
}

#[tokio::test]
async fn internal_error_detail_never_reaches_the_client() {
    let err = AppError::InternalError("connection string: postgres://u:p@db".into());

    let (status, json) = render(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
    assert!(!json.to_string().contains("postgres://"));
}

#[tokio::test]
async fn core_internal_detail_never_reaches_the_client() {
    let err = AppError::Core(CoreError::Internal("worker pool exhausted".into()));

    let (status, json) = render(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
    assert!(!json.to_string().contains("worker pool"));
}

#[tokio::test]
async fn error_body_has_exactly_error_and_code_keys() {
    let (_, json) = render(AppError::BadRequest("nope".into())).await;

    let body = json.as_object().unwrap();
    assert_eq!(body.len(), 2);
    assert!(body.contains_key("error"));
    assert!(body.contains_key("code"));
}
