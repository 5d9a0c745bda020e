//! Comment entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::shared::error::AppError;

/// A comment row joined with the author's active profile image path.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    /// Author nickname snapshot taken at write time.
    pub nickname: String,
    pub content: String,
    pub author_profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for comment data access.
///
/// Comment ids are always scoped by their parent post in queries, so a
/// comment id from another post can never match.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Non-deleted comments of a post, oldest first.
    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError>;

    /// Insert a comment and increment the parent's `comment_count` in one
    /// transaction. Returns the new comment id.
    async fn create(
        &self,
        post_id: i64,
        user_id: i64,
        nickname: &str,
        content: &str,
    ) -> Result<i64, AppError>;

    /// Author id of an active comment under the given post.
    async fn find_author(&self, post_id: i64, comment_id: i64)
        -> Result<Option<i64>, AppError>;

    /// Update content; `false` when no active row matched.
    async fn update(&self, post_id: i64, comment_id: i64, content: &str)
        -> Result<bool, AppError>;

    /// Soft-delete and decrement the parent's `comment_count` (clamped at
    /// zero) in one transaction; `false` when no active row matched.
    async fn soft_delete(&self, post_id: i64, comment_id: i64) -> Result<bool, AppError>;
}
