//! Shared Utilities
//!
//! Common types used across all layers: wire codes, the application error
//! taxonomy and the validation rule chains.

pub mod codes;
pub mod error;
pub mod validation;
