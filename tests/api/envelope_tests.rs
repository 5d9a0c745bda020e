//! Error Envelope Tests
//!
//! Every error leaves the router as `{code, data}` with the right status,
//! including the router-level fallbacks for unknown paths and wrong methods.

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use serde_json::Value;

use board_server::shared::codes;
use board_server::shared::error::AppError;
use board_server::shared::validation::FieldErrors;

use crate::common::{body_json, send};

fn contract_router() -> Router {
    Router::new()
        .route("/ok", get(|| async { "ok" }))
        .route(
            "/conflict",
            get(|| async { AppError::Conflict(codes::ALREADY_LIKED) }),
        )
        .route(
            "/invalid",
            get(|| async {
                let mut report = FieldErrors::default();
                report.add("email", codes::REQUIRED);
                AppError::Validation(report)
            }),
        )
        .fallback(|| async { AppError::NotFound(codes::NOT_FOUND) })
        .method_not_allowed_fallback(|| async { AppError::MethodNotAllowed })
}

#[tokio::test]
async fn unknown_path_is_a_not_found_envelope() {
    let router = contract_router();
    let response = send(&router, "GET", "/nope", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["data"], Value::Null);
}

#[tokio::test]
async fn wrong_method_on_a_known_path_is_405_not_404() {
    let router = contract_router();
    let response = send(&router, "POST", "/ok", Some("{}")).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn conflict_carries_its_specific_code() {
    let router = contract_router();
    let response = send(&router, "GET", "/conflict", None).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "ALREADY_LIKED");
    assert_eq!(json["data"], Value::Null);
}

#[tokio::test]
async fn validation_failure_reports_fields_in_data() {
    let router = contract_router();
    let response = send(&router, "GET", "/invalid", None).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_INPUT");
    assert_eq!(json["data"]["email"][0], "REQUIRED");
}
