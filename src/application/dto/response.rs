//! Response DTOs
//!
//! Success payloads wrapped in the uniform `{code, data}` envelope, and the
//! projections that turn domain rows into wire shapes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Comment, Post, SessionData, UserProfile};

/// The uniform success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(code: &str, data: T) -> Self {
        Self {
            code: code.to_string(),
            data,
        }
    }

    pub fn with_status(status: StatusCode, code: &str, data: T) -> Response {
        (status, Json(Self::new(code, data))).into_response()
    }

    /// 200 OK envelope.
    pub fn ok(code: &str, data: T) -> Response {
        Self::with_status(StatusCode::OK, code, data)
    }

    /// 201 Created envelope.
    pub fn created(code: &str, data: T) -> Response {
        Self::with_status(StatusCode::CREATED, code, data)
    }
}

/// Turn a stored server-relative file path into a URL path.
pub fn public_url(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Identity payload returned by login and the session probe.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserResponse {
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
    pub profile_image_url: Option<String>,
}

impl From<&SessionData> for AuthUserResponse {
    fn from(data: &SessionData) -> Self {
        Self {
            user_id: data.user_id,
            email: data.email.clone(),
            nickname: data.nickname.clone(),
            profile_image_url: data.profile_image_url.as_deref().map(public_url),
        }
    }
}

/// Public profile payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            user_id: profile.user_id,
            email: profile.email,
            nickname: profile.nickname,
            profile_image_url: profile.profile_image_url.as_deref().map(public_url),
            created_at: profile.created_at,
        }
    }
}

/// Post payload shared by the list, search and detail endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub post_id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub like_count: i64,
    pub comment_count: i64,
    pub view_count: i64,
    pub attach_file_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            post_id: post.id,
            user_id: post.user_id,
            nickname: post.nickname,
            title: post.title,
            content: post.content,
            like_count: post.like_count,
            comment_count: post.comment_count,
            view_count: post.view_count,
            attach_file_url: post.attach_file_path.as_deref().map(public_url),
            profile_image_url: post.author_profile_image.as_deref().map(public_url),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Comment payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comment_id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub content: String,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            comment_id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            nickname: comment.nickname,
            content: comment.content,
            profile_image_url: comment.author_profile_image.as_deref().map(public_url),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Id payload for signup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdResponse {
    pub user_id: i64,
}

/// Id payload for post creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIdResponse {
    pub post_id: i64,
}

/// Id payload for comment creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentIdResponse {
    pub comment_id: i64,
}

/// Counter payload for like and unlike.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeCountResponse {
    pub like_count: i64,
}

/// Stored path payload for the upload endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_path: String,
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stored_paths_become_url_paths() {
        assert_eq!(public_url("public/image/a.png"), "/public/image/a.png");
        assert_eq!(public_url("/public/image/a.png"), "/public/image/a.png");
    }

    #[test]
    fn envelope_serializes_code_and_data() {
        let body = ApiResponse::new("LIKE_POST_SUCCESS", LikeCountResponse { like_count: 3 });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "LIKE_POST_SUCCESS");
        assert_eq!(json["data"]["likeCount"], 3);
    }
}
