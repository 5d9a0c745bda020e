//! User Handlers

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use super::auth::expired_session_cookie;

use crate::application::dto::{
    ApiResponse, AuthUserResponse, ChangePasswordRequest, CheckEmailQuery, CheckNicknameQuery,
    UpdateUserRequest, UserResponse,
};
use crate::presentation::middleware::CurrentUser;
use crate::shared::codes;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_id_param, validation_error};
use crate::startup::AppState;

/// GET /api/v1/users/email/check
pub async fn check_email(
    State(state): State<AppState>,
    Query(query): Query<CheckEmailQuery>,
) -> Result<Response, AppError> {
    query.validate().map_err(validation_error)?;

    state.user_service.check_email_available(&query.email).await?;
    Ok(ApiResponse::ok(codes::AVAILABLE_EMAIL, serde_json::Value::Null))
}

/// GET /api/v1/users/nickname/check
pub async fn check_nickname(
    State(state): State<AppState>,
    Query(query): Query<CheckNicknameQuery>,
) -> Result<Response, AppError> {
    query.validate().map_err(validation_error)?;

    state
        .user_service
        .check_nickname_available(&query.nickname)
        .await?;
    Ok(ApiResponse::ok(
        codes::AVAILABLE_NICKNAME,
        serde_json::Value::Null,
    ))
}

/// GET /api/v1/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(user_id): Path<String>,
) -> Result<Response, AppError> {
    let user_id = parse_id_param("user_id", &user_id)?;

    let profile = state.user_service.get_profile(&current.data, user_id).await?;
    Ok(ApiResponse::ok(
        codes::GET_USER_SUCCESS,
        UserResponse::from(profile),
    ))
}

/// PUT /api/v1/users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Response, AppError> {
    let user_id = parse_id_param("user_id", &user_id)?;
    payload.validate().map_err(validation_error)?;

    let updated = state
        .user_service
        .update_profile(&current.data, &current.session_id, user_id, &payload)
        .await?;

    Ok(ApiResponse::ok(
        codes::UPDATE_USER_DATA_SUCCESS,
        AuthUserResponse::from(&updated),
    ))
}

/// PATCH /api/v1/users/{user_id}/password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(user_id): Path<String>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Response, AppError> {
    let user_id = parse_id_param("user_id", &user_id)?;
    payload.validate().map_err(validation_error)?;

    state
        .user_service
        .change_password(&current.data, user_id, &payload.password)
        .await?;

    Ok(ApiResponse::created(
        codes::CHANGE_PASSWORD_SUCCESS,
        serde_json::Value::Null,
    ))
}

/// DELETE /api/v1/users/{user_id}
pub async fn withdraw(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(user_id): Path<String>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let user_id = parse_id_param("user_id", &user_id)?;

    state
        .user_service
        .withdraw(&current.data, &current.session_id, user_id)
        .await?;

    let jar = jar.remove(expired_session_cookie(&state));
    let body = ApiResponse::new(codes::DELETE_USER_SUCCESS, serde_json::Value::Null);

    Ok((StatusCode::OK, jar, Json(body)).into_response())
}
