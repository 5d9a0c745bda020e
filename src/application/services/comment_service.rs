//! Comment Service
//!
//! Comment reads and writes, always scoped by the parent post.

use std::sync::Arc;

use crate::domain::{Comment, CommentRepository, PostRepository, SessionData, UserRepository};
use crate::shared::codes;
use crate::shared::error::AppError;

pub struct CommentService<C, P, U>
where
    C: CommentRepository,
    P: PostRepository,
    U: UserRepository,
{
    comments: Arc<C>,
    posts: Arc<P>,
    users: Arc<U>,
}

impl<C, P, U> CommentService<C, P, U>
where
    C: CommentRepository,
    P: PostRepository,
    U: UserRepository,
{
    pub fn new(comments: Arc<C>, posts: Arc<P>, users: Arc<U>) -> Self {
        Self {
            comments,
            posts,
            users,
        }
    }

    pub async fn list(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        // Listing under a missing post reports the post, not an empty list.
        if self.posts.find_owner(post_id).await?.is_none() {
            return Err(AppError::NotFound(codes::POST_NOT_FOUND));
        }
        self.comments.list_by_post(post_id).await
    }

    /// The author must still be an active account; the parent post is
    /// verified inside the repository transaction.
    pub async fn write(
        &self,
        author: &SessionData,
        post_id: i64,
        content: &str,
    ) -> Result<i64, AppError> {
        if !self.users.is_active(author.user_id).await? {
            return Err(AppError::NotFound(codes::NOT_FOUND_USER));
        }
        self.comments
            .create(post_id, author.user_id, &author.nickname, content)
            .await
    }

    pub async fn update(
        &self,
        user_id: i64,
        post_id: i64,
        comment_id: i64,
        content: &str,
    ) -> Result<(), AppError> {
        self.ensure_author(post_id, comment_id, user_id).await?;
        if !self.comments.update(post_id, comment_id, content).await? {
            return Err(AppError::NotFound(codes::COMMENT_NOT_FOUND));
        }
        Ok(())
    }

    pub async fn delete(
        &self,
        user_id: i64,
        post_id: i64,
        comment_id: i64,
    ) -> Result<(), AppError> {
        self.ensure_author(post_id, comment_id, user_id).await?;
        if !self.comments.soft_delete(post_id, comment_id).await? {
            return Err(AppError::NotFound(codes::COMMENT_NOT_FOUND));
        }
        Ok(())
    }

    async fn ensure_author(
        &self,
        post_id: i64,
        comment_id: i64,
        user_id: i64,
    ) -> Result<(), AppError> {
        let author = self
            .comments
            .find_author(post_id, comment_id)
            .await?
            .ok_or(AppError::NotFound(codes::COMMENT_NOT_FOUND))?;
        if author != user_id {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}
