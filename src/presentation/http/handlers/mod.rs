//! HTTP Handlers

pub mod auth;
pub mod comment;
pub mod health;
pub mod post;
pub mod upload;
pub mod user;
