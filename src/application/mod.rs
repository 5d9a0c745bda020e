//! # Application Layer
//!
//! Services and DTOs sitting between the HTTP surface and the domain.

pub mod dto;
pub mod services;
