//! Authentication Handlers

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use crate::application::dto::{
    ApiResponse, AuthUserResponse, LoginRequest, SignupRequest, UserIdResponse,
};
use crate::presentation::middleware::CurrentUser;
use crate::shared::codes;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Build the session cookie. No Max-Age: the browser keeps it for the
/// session and the server-side TTL is the real expiry.
fn session_cookie(state: &AppState, session_id: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(state.settings.session.cookie_name.clone(), session_id);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(state.settings.session.secure);
    cookie
}

/// Removal cookie; must match the path the session cookie was set with.
pub fn expired_session_cookie(state: &AppState) -> Cookie<'static> {
    let mut cookie = Cookie::from(state.settings.session.cookie_name.clone());
    cookie.set_path("/");
    cookie
}

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Response, AppError> {
    payload.validate().map_err(validation_error)?;

    let user_id = state.auth_service.signup(&payload).await?;

    tracing::info!(user_id, "new account registered");
    Ok(ApiResponse::created(
        codes::SIGNUP_SUCCESS,
        UserIdResponse { user_id },
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    payload.validate().map_err(validation_error)?;

    let old_session = jar
        .get(&state.settings.session.cookie_name)
        .map(|c| c.value().to_string());

    let (session_id, data) = state
        .auth_service
        .login(&payload.email, &payload.password, old_session.as_deref())
        .await?;

    let jar = jar.add(session_cookie(&state, session_id));
    let body = ApiResponse::new(codes::LOGIN_SUCCESS, AuthUserResponse::from(&data));

    Ok((StatusCode::OK, jar, Json(body)).into_response())
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    state.auth_service.logout(&current.session_id).await?;

    let jar = jar.remove(expired_session_cookie(&state));
    let body = ApiResponse::new(codes::LOGOUT_SUCCESS, serde_json::Value::Null);

    Ok((StatusCode::OK, jar, Json(body)).into_response())
}

/// GET /api/v1/auth/check
///
/// Session probe: answers with the identity the middleware resolved.
pub async fn check(
    Extension(current): Extension<CurrentUser>,
) -> Result<Response, AppError> {
    Ok(ApiResponse::ok(
        codes::AUTH_SUCCESS,
        AuthUserResponse::from(&current.data),
    ))
}
