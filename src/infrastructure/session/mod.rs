//! Session Infrastructure
//!
//! Redis connection bootstrap and the session store implementation.

pub mod store;

use redis::aio::ConnectionManager;
use redis::Client;

use crate::config::RedisSettings;

pub use store::RedisSessionStore;

/// Open a managed Redis connection for the session store.
pub async fn create_redis_connection(
    settings: &RedisSettings,
) -> Result<ConnectionManager, redis::RedisError> {
    let client = Client::open(settings.url.as_str())?;
    ConnectionManager::new(client).await
}
