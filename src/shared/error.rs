//! Application Error Types
//!
//! Centralized error handling with Axum integration. The error kinds form a
//! closed taxonomy; `IntoResponse` is the terminal normalizer that maps every
//! kind to a status code and the uniform `{code, data}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use super::codes;
use super::validation::FieldErrors;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request shape violation; carries the field -> rule-codes map.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// Missing or invalid session, or bad credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    /// Acting user is not the owner of the target row.
    #[error("forbidden")]
    Forbidden,

    /// Entity absent or soft-deleted.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Uniqueness or like-state violation.
    #[error("conflict: {0}")]
    Conflict(&'static str),

    #[error("payload too large")]
    PayloadTooLarge,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("request timeout")]
    RequestTimeout,

    #[error("internal error: {0}")]
    Internal(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("session store error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// The uniform response envelope for errors.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub data: Value,
}

impl AppError {
    /// Status code and wire code for this error, without structured data.
    fn status_and_code(&self) -> (StatusCode, &str) {
        match self {
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, codes::INVALID_INPUT),
            AppError::Unauthorized(code) => (StatusCode::UNAUTHORIZED, code),
            AppError::Forbidden => (StatusCode::FORBIDDEN, codes::FORBIDDEN),
            AppError::NotFound(code) => (StatusCode::NOT_FOUND, code),
            AppError::Conflict(code) => (StatusCode::CONFLICT, code),
            AppError::PayloadTooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, codes::PAYLOAD_TOO_LARGE)
            }
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, codes::METHOD_NOT_ALLOWED)
            }
            AppError::RequestTimeout => (StatusCode::REQUEST_TIMEOUT, codes::REQUEST_TIMEOUT),
            AppError::Internal(_) | AppError::Database(_) | AppError::Redis(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::INTERNAL_SERVER_ERROR,
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Internal details are logged, never serialized to the client.
        match &self {
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::Database(e) => tracing::error!("Database error: {}", e),
            AppError::Redis(e) => tracing::error!("Session store error: {}", e),
            _ => {}
        }

        let (status, code) = self.status_and_code();
        let data = match &self {
            AppError::Validation(errors) => {
                serde_json::to_value(errors).unwrap_or(Value::Null)
            }
            _ => Value::Null,
        };

        let body = ErrorBody {
            code: code.to_string(),
            data,
        };

        (status, Json(body)).into_response()
    }
}
