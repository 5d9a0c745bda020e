//! Core domain entities and repository traits.

pub mod attachment;
pub mod comment;
pub mod post;
pub mod session;
pub mod user;

pub use attachment::FileCategory;
pub use comment::{Comment, CommentRepository};
pub use post::{AttachmentChange, NewPost, Post, PostRepository, SearchSort};
pub use session::{SessionData, SessionStore};
pub use user::{NewUser, UserCredentials, UserProfile, UserRepository};
