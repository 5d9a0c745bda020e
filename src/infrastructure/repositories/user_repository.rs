//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait. Profile images
//! live in the `files` table; the active one is referenced by
//! `users.file_id` and replacing it repoints the reference inside the same
//! transaction as the new file row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{FileCategory, NewUser, UserCredentials, UserProfile, UserRepository};
use crate::shared::codes;
use crate::shared::error::AppError;

/// Row shape shared by the credential and profile queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    nickname: String,
    password_hash: String,
    profile_image_path: Option<String>,
    created_at: DateTime<Utc>,
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate a unique-constraint violation on the users table into the
/// matching conflict code; anything else stays a database error.
fn map_user_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("users_email_key") => AppError::Conflict(codes::ALREADY_EXIST_EMAIL),
                Some("users_nickname_key") => AppError::Conflict(codes::ALREADY_EXIST_NICKNAME),
                _ => AppError::Database(e),
            };
        }
    }
    AppError::Database(e)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        // The user row goes in first: the file row references its owner.
        let user_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, password_hash, nickname)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.nickname)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_user_unique_violation)?;

        if let Some(path) = &user.profile_image_url {
            let file_id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO files (user_id, category, file_path)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(user_id)
            .bind(FileCategory::Profile.as_i16())
            .bind(path)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query("UPDATE users SET file_id = $2 WHERE id = $1")
                .bind(user_id)
                .bind(file_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(user_id)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.email, u.nickname, u.password_hash,
                   f.file_path AS profile_image_path, u.created_at
            FROM users u
            LEFT JOIN files f ON f.id = u.file_id
            WHERE u.email = $1 AND u.deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| UserCredentials {
            user_id: r.id,
            email: r.email,
            nickname: r.nickname,
            password_hash: r.password_hash,
            profile_image_url: r.profile_image_path,
        }))
    }

    async fn find_profile_by_id(&self, id: i64) -> Result<Option<UserProfile>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.email, u.nickname, u.password_hash,
                   f.file_path AS profile_image_path, u.created_at
            FROM users u
            LEFT JOIN files f ON f.id = u.file_id
            WHERE u.id = $1 AND u.deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| UserProfile {
            user_id: r.id,
            email: r.email,
            nickname: r.nickname,
            profile_image_url: r.profile_image_path,
            created_at: r.created_at,
        }))
    }

    async fn is_active(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Deliberately scans soft-deleted rows too: a withdrawn account keeps
    /// its email reserved.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn nickname_exists(&self, nickname: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE nickname = $1)",
        )
        .bind(nickname)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_nickname(&self, id: i64, nickname: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET nickname = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(nickname)
        .execute(&self.pool)
        .await
        .map_err(map_user_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(codes::NOT_FOUND_USER));
        }

        Ok(())
    }

    async fn replace_profile_image(&self, id: i64, path: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let file_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO files (user_id, category, file_path)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(FileCategory::Profile.as_i16())
        .bind(path)
        .fetch_one(&mut *tx)
        .await?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET file_id = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(file_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(codes::NOT_FOUND_USER));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn clear_profile_image(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET file_id = NULL, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(codes::NOT_FOUND_USER));
        }

        Ok(())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(codes::NOT_FOUND_USER));
        }

        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
