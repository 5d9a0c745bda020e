//! Health Check Handler

use axum::response::Response;

use crate::application::dto::ApiResponse;

/// GET /health
pub async fn health_check() -> Response {
    ApiResponse::ok("OK", serde_json::Value::Null)
}
