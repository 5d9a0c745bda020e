//! Middleware Components

pub mod auth;
pub mod cors;
pub mod logging;
pub mod timeout;

pub use auth::{auth_middleware, CurrentUser};
pub use cors::create_cors_layer;
pub use logging::create_trace_layer;
pub use timeout::timeout_middleware;
