//! # Overmind Shortener
//!
//! Short-link registry and redirect service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Link entity, error types and the storage trait
//! - **Application Layer** ([`application`]) - The link registry: code generation,
//!   validation, collision retry, click counting
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool and repository
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random or custom 4-character alphanumeric codes
//! - Atomic click counting on every resolve
//! - Admin API guarded by IP allowlist and/or shared password
//! - URL safety checks against private and loopback targets
//! - Rate limiting and request tracing
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite:./data/shortener.db"
//! export SITE_URL="https://go.example.com"
//! export ADMIN_PASSWORD="change-me"
//!
//! cargo run
//! ```
//!
//! Migrations are embedded and applied on startup.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::{Link, NewLink};
    pub use crate::domain::errors::{InsertError, RegistryError, StorageError};
    pub use crate::error::AppError;
    pub use crate::state::{AdminGuard, AppState};
}
