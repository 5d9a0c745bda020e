//! Redis Session Store
//!
//! Server-side sessions as JSON blobs under opaque ids, with a sliding TTL.
//! The cookie only ever carries the id.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::domain::{SessionData, SessionStore};
use crate::shared::error::AppError;

const SESSION_KEY_PREFIX: &str = "session:";

/// Redis-backed implementation of [`SessionStore`].
#[derive(Clone)]
pub struct RedisSessionStore {
    redis: ConnectionManager,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(redis: ConnectionManager, ttl_secs: u64) -> Self {
        Self { redis, ttl_secs }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_KEY_PREFIX}{session_id}")
    }

    async fn write(&self, session_id: &str, data: &SessionData) -> Result<(), AppError> {
        let value = serde_json::to_string(data)
            .map_err(|e| AppError::Internal(format!("Session serialization error: {}", e)))?;

        let mut conn = self.redis.clone();
        conn.set_ex::<_, _, ()>(Self::key(session_id), value, self.ttl_secs)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, data: &SessionData) -> Result<String, AppError> {
        let session_id = Uuid::new_v4().to_string();
        self.write(&session_id, data).await?;
        Ok(session_id)
    }

    async fn get(&self, session_id: &str) -> Result<Option<SessionData>, AppError> {
        let mut conn = self.redis.clone();
        let value: Option<String> = conn.get(Self::key(session_id)).await?;

        match value {
            Some(json) => {
                let data = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Session deserialization error: {}", e))
                })?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, session_id: &str, data: &SessionData) -> Result<(), AppError> {
        self.write(session_id, data).await
    }

    async fn destroy(&self, session_id: &str) -> Result<bool, AppError> {
        let mut conn = self.redis.clone();
        let deleted: i64 = conn.del(Self::key(session_id)).await?;
        Ok(deleted > 0)
    }

    async fn regenerate<'a>(
        &self,
        old_id: Option<&'a str>,
        data: &SessionData,
    ) -> Result<String, AppError> {
        // The pre-login id is destroyed first so it can never be replayed
        // into the authenticated session.
        if let Some(old) = old_id {
            self.destroy(old).await?;
        }
        self.create(data).await
    }
}
