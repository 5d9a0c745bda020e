//! User entity and repository trait.
//!
//! Maps to the `users` table. Rows are soft-deleted: `deleted_at` is set
//! instead of removing the row, and every query filters it out.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Data for a new account. The password is already hashed by the time it
/// reaches the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub nickname: String,
    /// Server-relative path of an uploaded profile image, if any.
    pub profile_image_url: Option<String>,
}

/// Login projection: everything needed to verify credentials and seed the
/// session, joined with the active profile image path.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
    pub password_hash: String,
    pub profile_image_url: Option<String>,
}

/// Public profile projection returned by the user detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for user data access.
///
/// Uniqueness probes intentionally scan all rows including soft-deleted
/// ones, so a withdrawn account's email cannot be re-registered.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; when a profile image path is present, the file row
    /// insert and the `users.file_id` repoint share the insert transaction.
    async fn create(&self, user: &NewUser) -> Result<i64, AppError>;

    /// Credentials for an active (non-deleted) user by email.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError>;

    /// Profile of an active user.
    async fn find_profile_by_id(&self, id: i64) -> Result<Option<UserProfile>, AppError>;

    /// Whether an active (non-deleted) user row exists. Write paths consult
    /// this so a session outliving a withdrawn account cannot author rows.
    async fn is_active(&self, id: i64) -> Result<bool, AppError>;

    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    async fn nickname_exists(&self, nickname: &str) -> Result<bool, AppError>;

    async fn update_nickname(&self, id: i64, nickname: &str) -> Result<(), AppError>;

    /// Insert a new profile file row and repoint `users.file_id` to it,
    /// atomically.
    async fn replace_profile_image(&self, id: i64, path: &str) -> Result<(), AppError>;

    /// Detach the current profile image without touching the file row.
    async fn clear_profile_image(&self, id: i64) -> Result<(), AppError>;

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError>;

    /// Soft-delete; `false` when no active row matched.
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;
}
