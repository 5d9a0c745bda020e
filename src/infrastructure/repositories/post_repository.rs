//! Post Repository Implementation
//!
//! PostgreSQL implementation of the PostRepository trait. Counter
//! maintenance (likes, views) and file repoints run inside transactions so
//! a crash can never leave the count and the backing rows disagreeing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{AttachmentChange, FileCategory, NewPost, Post, PostRepository, SearchSort};
use crate::shared::codes;
use crate::shared::error::AppError;

/// Joined row produced by the list, search and detail queries.
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    nickname: String,
    title: String,
    content: String,
    like_count: i64,
    comment_count: i64,
    view_count: i64,
    attach_file_path: Option<String>,
    author_profile_image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            user_id: self.user_id,
            nickname: self.nickname,
            title: self.title,
            content: self.content,
            like_count: self.like_count,
            comment_count: self.comment_count,
            view_count: self.view_count,
            attach_file_path: self.attach_file_path,
            author_profile_image: self.author_profile_image,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Shared SELECT head: posts joined with their attachment path and the
/// author's active profile image.
const POST_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.nickname, p.title, p.content,
           p.like_count, p.comment_count, p.view_count,
           af.file_path AS attach_file_path,
           uf.file_path AS author_profile_image,
           p.created_at, p.updated_at
    FROM posts p
    LEFT JOIN files af ON af.id = p.file_id
    LEFT JOIN users u ON u.id = p.user_id
    LEFT JOIN files uf ON uf.id = u.file_id
"#;

/// PostgreSQL post repository implementation.
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>, AppError> {
        let query = format!(
            r#"
            {POST_SELECT}
            WHERE p.deleted_at IS NULL
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $1 OFFSET $2
            "#
        );

        let rows = sqlx::query_as::<_, PostRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn search(
        &self,
        keyword: &str,
        sort: SearchSort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>, AppError> {
        let order = match sort {
            SearchSort::Recent => "p.created_at DESC, p.id DESC",
            SearchSort::Relevance => {
                "ts_rank(to_tsvector('simple', p.title || ' ' || p.content), \
                 plainto_tsquery('simple', $1)) DESC, p.created_at DESC"
            }
        };

        let query = format!(
            r#"
            {POST_SELECT}
            WHERE p.deleted_at IS NULL
              AND to_tsvector('simple', p.title || ' ' || p.content)
                  @@ plainto_tsquery('simple', $1)
            ORDER BY {order}
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = sqlx::query_as::<_, PostRow>(&query)
            .bind(keyword)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn fetch_detail_marking_view(&self, id: i64) -> Result<Option<Post>, AppError> {
        let mut tx = self.pool.begin().await?;

        let bumped = sqlx::query(
            "UPDATE posts SET view_count = view_count + 1 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if bumped.rows_affected() == 0 {
            return Ok(None);
        }

        let query = format!("{POST_SELECT} WHERE p.id = $1 AND p.deleted_at IS NULL");
        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row.into_post()))
    }

    async fn create(&self, post: &NewPost) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        // The post row goes in first: the file row carries a back-reference
        // to it alongside the owner.
        let post_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO posts (user_id, nickname, title, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(post.user_id)
        .bind(&post.nickname)
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(path) = &post.attach_file_path {
            let file_id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO files (user_id, post_id, category, file_path)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(post.user_id)
            .bind(post_id)
            .bind(FileCategory::PostAttachment.as_i16())
            .bind(path)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query("UPDATE posts SET file_id = $2 WHERE id = $1")
                .bind(post_id)
                .bind(file_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(post_id)
    }

    async fn find_owner(&self, id: i64) -> Result<Option<i64>, AppError> {
        let owner = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM posts WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        title: &str,
        content: &str,
        attachment: &AttachmentChange,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        match attachment {
            AttachmentChange::Keep => {}
            AttachmentChange::Remove => {
                sqlx::query("UPDATE posts SET file_id = NULL WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            AttachmentChange::Replace(path) => {
                let file_id = sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO files (user_id, post_id, category, file_path)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    "#,
                )
                .bind(user_id)
                .bind(id)
                .bind(FileCategory::PostAttachment.as_i16())
                .bind(path)
                .fetch_one(&mut *tx)
                .await?;

                sqlx::query("UPDATE posts SET file_id = $2 WHERE id = $1")
                    .bind(id)
                    .bind(file_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $3, content = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(content)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(codes::POST_NOT_FOUND));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE posts SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn like(&self, post_id: i64, user_id: i64) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock the post row so concurrent like/unlike serialize on it.
        let locked = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM posts WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Err(AppError::NotFound(codes::POST_NOT_FOUND));
        }

        sqlx::query("INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::Conflict(codes::ALREADY_LIKED)
                }
                _ => AppError::Database(e),
            })?;

        let count = sqlx::query_scalar::<_, i64>(
            "UPDATE posts SET like_count = like_count + 1 WHERE id = $1 RETURNING like_count",
        )
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(count)
    }

    async fn unlike(&self, post_id: i64, user_id: i64) -> Result<i64, AppError> {
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

        let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if removed.rows_affected() == 0 {
            return Err(AppError::Conflict(codes::ALREADY_UNLIKED));
        }

        // Clamped at zero so a drifted counter can never go negative.
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE posts SET like_count = GREATEST(like_count - 1, 0)
            WHERE id = $1
            RETURNING like_count
            "#,
        )
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(count)
    }
}
