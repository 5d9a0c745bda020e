//! Comment Handlers

use axum::{
    extract::{Extension, Path, State},
    response::Response,
    Json,
};
use validator::Validate;

use crate::application::dto::{
    ApiResponse, CommentIdResponse, CommentResponse, WriteCommentRequest,
};
use crate::presentation::middleware::CurrentUser;
use crate::shared::codes;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_id_param, validation_error};
use crate::startup::AppState;

/// GET /api/v1/posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Response, AppError> {
    let post_id = parse_id_param("post_id", &post_id)?;

    let comments = state.comment_service.list(post_id).await?;
    let items: Vec<CommentResponse> = comments.into_iter().map(CommentResponse::from).collect();

    Ok(ApiResponse::ok(codes::COMMENTS_RETRIEVED, items))
}

/// POST /api/v1/posts/{post_id}/comments
pub async fn write_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<String>,
    Json(payload): Json<WriteCommentRequest>,
) -> Result<Response, AppError> {
    let post_id = parse_id_param("post_id", &post_id)?;
    payload.validate().map_err(validation_error)?;

    let comment_id = state
        .comment_service
        .write(&current.data, post_id, &payload.content)
        .await?;

    Ok(ApiResponse::created(
        codes::WRITE_COMMENT_SUCCESS,
        CommentIdResponse { comment_id },
    ))
}

/// PATCH /api/v1/posts/{post_id}/comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path((post_id, comment_id)): Path<(String, String)>,
    Json(payload): Json<WriteCommentRequest>,
) -> Result<Response, AppError> {
    let post_id = parse_id_param("post_id", &post_id)?;
    let comment_id = parse_id_param("comment_id", &comment_id)?;
    payload.validate().map_err(validation_error)?;

    state
        .comment_service
        .update(current.data.user_id, post_id, comment_id, &payload.content)
        .await?;

    Ok(ApiResponse::ok(
        codes::COMMENT_UPDATED,
        serde_json::Value::Null,
    ))
}

/// DELETE /api/v1/posts/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let post_id = parse_id_param("post_id", &post_id)?;
    let comment_id = parse_id_param("comment_id", &comment_id)?;

    state
        .comment_service
        .delete(current.data.user_id, post_id, comment_id)
        .await?;

    Ok(ApiResponse::ok(
        codes::COMMENT_DELETED,
        serde_json::Value::Null,
    ))
}
