//! Infrastructure layer for external integrations.
//!
//! Implements the storage port defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - SQLite repository implementation and pool setup

pub mod persistence;
