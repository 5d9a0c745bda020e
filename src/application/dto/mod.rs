//! Data Transfer Objects
//!
//! Request validation shapes and response projections.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
