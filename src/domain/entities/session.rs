//! Session record and store trait.
//!
//! A session is a server-side record keyed by an opaque id carried in a
//! cookie. It holds a cached projection of the user, not owned domain rows.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// The identity projection cached per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
    pub profile_image_url: Option<String>,
}

/// Server-side session store.
///
/// Login must go through [`SessionStore::regenerate`] so the pre-login
/// session id is never reused (fixation mitigation): the old record is
/// destroyed and a fresh id is written before any response is produced.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a fresh session and return its opaque id.
    async fn create(&self, data: &SessionData) -> Result<String, AppError>;

    async fn get(&self, session_id: &str) -> Result<Option<SessionData>, AppError>;

    /// Overwrite the record under an existing id, refreshing its TTL.
    async fn save(&self, session_id: &str, data: &SessionData) -> Result<(), AppError>;

    /// Destroy a session; `false` when the id was unknown.
    async fn destroy(&self, session_id: &str) -> Result<bool, AppError>;

    /// Destroy `old_id` (when present) and create a fresh session in one
    /// sequence, returning the new id.
    async fn regenerate<'a>(
        &self,
        old_id: Option<&'a str>,
        data: &SessionData,
    ) -> Result<String, AppError>;
}
