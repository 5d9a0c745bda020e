//! # Infrastructure Layer
//!
//! Concrete adapters behind the domain traits: PostgreSQL repositories and
//! the Redis session store.

pub mod database;
pub mod repositories;
pub mod session;

pub use database::{create_pool, run_migrations};
pub use repositories::{PgCommentRepository, PgPostRepository, PgUserRepository};
pub use session::{create_redis_connection, RedisSessionStore};
