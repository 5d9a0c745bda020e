//! Application Services
//!
//! Use-case orchestration over the domain repository traits.

pub mod auth_service;
pub mod comment_service;
pub mod post_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use comment_service::CommentService;
pub use post_service::PostService;
pub use user_service::UserService;
