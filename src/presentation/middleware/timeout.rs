//! Request Timeout Middleware
//!
//! Wall-clock budget per request. A request that exceeds it is answered
//! with the uniform 408 envelope; the handler's eventual output is dropped.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn timeout_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let budget = Duration::from_secs(state.settings.server.request_timeout_secs);

    match tokio::time::timeout(budget, next.run(request)).await {
        Ok(response) => Ok(response),
        Err(_) => Err(AppError::RequestTimeout),
    }
}
