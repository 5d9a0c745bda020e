//! # Domain Layer
//!
//! Core entities and repository traits of the board. Repository traits are
//! defined here so the application layer depends on contracts, not on the
//! PostgreSQL implementations.

pub mod entities;

pub use entities::*;
