//! Post entity and repository trait.
//!
//! Posts carry server-maintained counters (likes, comments, views) that are
//! only ever mutated through dedicated atomic operations, never through the
//! update path.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A post row joined with its attachment path and the author's active
/// profile image, as produced by the list/detail/search queries.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    /// Author nickname snapshot taken at write time.
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub like_count: i64,
    pub comment_count: i64,
    pub view_count: i64,
    pub attach_file_path: Option<String>,
    pub author_profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i64,
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub attach_file_path: Option<String>,
}

/// What to do with a post's attachment on update.
///
/// A PATCH body that omits the field keeps the current attachment, an
/// explicit null removes it, and a path replaces it with a fresh file row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentChange {
    Keep,
    Remove,
    Replace(String),
}

/// Sort order for post search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSort {
    Recent,
    Relevance,
}

impl SearchSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "recent" => Some(Self::Recent),
            "relevance" => Some(Self::Relevance),
            _ => None,
        }
    }
}

/// Repository trait for post data access. All reads exclude soft-deleted
/// rows; like/unlike run as single transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Non-deleted posts, newest first.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>, AppError>;

    /// Full-text match on title/content.
    async fn search(
        &self,
        keyword: &str,
        sort: SearchSort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>, AppError>;

    /// Detail fetch that increments `view_count` by exactly one as a side
    /// effect; the returned row reflects the incremented value.
    async fn fetch_detail_marking_view(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Insert a post; an attachment path adds the file row and repoints
    /// `posts.file_id` within the same transaction.
    async fn create(&self, post: &NewPost) -> Result<i64, AppError>;

    /// Author id of an active post.
    async fn find_owner(&self, id: i64) -> Result<Option<i64>, AppError>;

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        title: &str,
        content: &str,
        attachment: &AttachmentChange,
    ) -> Result<(), AppError>;

    /// Soft-delete; `false` when no active row matched.
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;

    /// Transactional like: post must be active, the (post, user) pair must
    /// not exist yet, `like_count` goes up by one. Returns the new count.
    async fn like(&self, post_id: i64, user_id: i64) -> Result<i64, AppError>;

    /// Transactional unlike: the pair must exist, `like_count` goes down by
    /// one clamped at zero. Returns the new count.
    async fn unlike(&self, post_id: i64, user_id: i64) -> Result<i64, AppError>;
}
