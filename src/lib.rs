//! # Board Server Library
//!
//! This crate provides a community board backend with:
//! - RESTful HTTP API endpoints
//! - Cookie sessions backed by Redis
//! - PostgreSQL for persistent storage
//! - Image uploads for profiles and post attachments
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database and session store implementations
//! - **Presentation Layer**: HTTP handlers, routing and middleware
//!
//! ## Module Structure
//!
//! ```text
//! board_server/
//! +-- config/        Configuration management
//! +-- domain/        Domain entities and repository traits
//! +-- application/   Application services and DTOs
//! +-- infrastructure/ Database and session store implementations
//! +-- presentation/  HTTP routes, handlers and middleware
//! +-- shared/        Common utilities (wire codes, errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers and middleware
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
