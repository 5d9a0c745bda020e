//! Comment Repository Implementation
//!
//! PostgreSQL implementation of the CommentRepository trait. Writes that
//! touch `posts.comment_count` run in the same transaction as the comment
//! row change.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Comment, CommentRepository};
use crate::shared::codes;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    nickname: String,
    content: String,
    author_profile_image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            post_id: self.post_id,
            user_id: self.user_id,
            nickname: self.nickname,
            content: self.content,
            author_profile_image: self.author_profile_image,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL comment repository implementation.
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.post_id, c.user_id, c.nickname, c.content,
                   uf.file_path AS author_profile_image,
                   c.created_at, c.updated_at
            FROM comments c
            LEFT JOIN users u ON u.id = c.user_id
            LEFT JOIN files uf ON uf.id = u.file_id
            WHERE c.post_id = $1 AND c.deleted_at IS NULL
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn create(
        &self,
        post_id: i64,
        user_id: i64,
        nickname: &str,
        content: &str,
    ) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM posts WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Err(AppError::NotFound(codes::POST_NOT_FOUND));
        }

        let comment_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO comments (post_id, user_id, nickname, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(nickname)
        .bind(content)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE posts SET comment_count = comment_count + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(comment_id)
    }

    async fn find_author(
        &self,
        post_id: i64,
        comment_id: i64,
    ) -> Result<Option<i64>, AppError> {
        let author = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT user_id FROM comments
            WHERE id = $1 AND post_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(comment_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    async fn update(
        &self,
        post_id: i64,
        comment_id: i64,
        content: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET content = $3, updated_at = NOW()
            WHERE id = $1 AND post_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(comment_id)
        .bind(post_id)
        .bind(content)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete(&self, post_id: i64, comment_id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE comments
            SET deleted_at = NOW()
            WHERE id = $1 AND post_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(comment_id)
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE posts SET comment_count = GREATEST(comment_count - 1, 0) WHERE id = $1",
        )
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
