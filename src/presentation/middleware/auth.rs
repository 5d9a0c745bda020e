//! Authentication Middleware
//!
//! Session-cookie validation for protected routes. The cookie only carries
//! an opaque id; identity comes from the server-side session record.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::domain::{SessionData, SessionStore};
use crate::shared::codes;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated caller, inserted into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub session_id: String,
    pub data: SessionData,
}

/// Read the session cookie from a request, if present.
pub fn session_cookie(request: &Request, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(request.headers());
    jar.get(cookie_name).map(|c| c.value().to_string())
}

/// Middleware that resolves the session cookie to a [`CurrentUser`].
///
/// A missing cookie and an expired or unknown session are indistinguishable
/// to the client: both are `REQUIRED_AUTHORIZATION`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = session_cookie(&request, &state.settings.session.cookie_name)
        .ok_or(AppError::Unauthorized(codes::REQUIRED_AUTHORIZATION))?;

    let data = state
        .sessions
        .get(&session_id)
        .await?
        .ok_or(AppError::Unauthorized(codes::REQUIRED_AUTHORIZATION))?;

    request.extensions_mut().insert(CurrentUser { session_id, data });

    Ok(next.run(request).await)
}
