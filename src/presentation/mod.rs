//! # Presentation Layer
//!
//! HTTP handlers, routing and middleware.

pub mod http;
pub mod middleware;

pub use http::create_router;
