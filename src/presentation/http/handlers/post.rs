//! Post Handlers

use axum::{
    extract::{Extension, Path, Query, State},
    response::Response,
    Json,
};
use validator::Validate;

use crate::application::dto::{
    ApiResponse, LikeCountResponse, PageQuery, PostIdResponse, PostResponse, SearchQuery,
    UpdatePostRequest, WritePostRequest,
};
use crate::presentation::middleware::CurrentUser;
use crate::shared::codes;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_id_param, validation_error};
use crate::startup::AppState;

/// GET /api/v1/posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    query.validate().map_err(validation_error)?;
    let (offset, limit) = query.page();

    let posts = state.post_service.list(offset, limit).await?;
    let items: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();

    Ok(ApiResponse::ok(codes::POSTS_RETRIEVED, items))
}

/// GET /api/v1/posts/search
pub async fn search_posts(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    query.validate().map_err(validation_error)?;
    let (offset, limit) = query.page();

    let posts = state
        .post_service
        .search(&query.keyword, query.sort_order(), offset, limit)
        .await?;
    let items: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();

    Ok(ApiResponse::ok(codes::POSTS_RETRIEVED, items))
}

/// GET /api/v1/posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Response, AppError> {
    let post_id = parse_id_param("post_id", &post_id)?;

    let post = state.post_service.detail(post_id).await?;
    Ok(ApiResponse::ok(
        codes::POST_RETRIEVED,
        PostResponse::from(post),
    ))
}

/// POST /api/v1/posts
pub async fn write_post(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<WritePostRequest>,
) -> Result<Response, AppError> {
    payload.validate().map_err(validation_error)?;

    let post_id = state.post_service.write(&current.data, &payload).await?;

    tracing::info!(post_id, user_id = current.data.user_id, "post created");
    Ok(ApiResponse::created(
        codes::WRITE_POST_SUCCESS,
        PostIdResponse { post_id },
    ))
}

/// PATCH /api/v1/posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<String>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Response, AppError> {
    let post_id = parse_id_param("post_id", &post_id)?;
    payload.validate().map_err(validation_error)?;

    state
        .post_service
        .update(current.data.user_id, post_id, &payload)
        .await?;

    Ok(ApiResponse::ok(
        codes::UPDATE_POST_SUCCESS,
        serde_json::Value::Null,
    ))
}

/// DELETE /api/v1/posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<String>,
) -> Result<Response, AppError> {
    let post_id = parse_id_param("post_id", &post_id)?;

    state
        .post_service
        .delete(current.data.user_id, post_id)
        .await?;

    Ok(ApiResponse::ok(
        codes::DELETE_POST_SUCCESS,
        serde_json::Value::Null,
    ))
}

/// POST /api/v1/posts/{post_id}/likes
pub async fn like_post(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<String>,
) -> Result<Response, AppError> {
    let post_id = parse_id_param("post_id", &post_id)?;

    let like_count = state
        .post_service
        .like(current.data.user_id, post_id)
        .await?;

    Ok(ApiResponse::created(
        codes::LIKE_POST_SUCCESS,
        LikeCountResponse { like_count },
    ))
}

/// DELETE /api/v1/posts/{post_id}/likes
pub async fn unlike_post(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<String>,
) -> Result<Response, AppError> {
    let post_id = parse_id_param("post_id", &post_id)?;

    let like_count = state
        .post_service
        .unlike(current.data.user_id, post_id)
        .await?;

    Ok(ApiResponse::ok(
        codes::UNLIKE_POST_SUCCESS,
        LikeCountResponse { like_count },
    ))
}
