//! Repository Implementations
//!
//! PostgreSQL-backed implementations of the domain repository traits.

pub mod comment_repository;
pub mod post_repository;
pub mod user_repository;

pub use comment_repository::PgCommentRepository;
pub use post_repository::PgPostRepository;
pub use user_repository::PgUserRepository;
