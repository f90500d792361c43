//! SQLite persistence.
//!
//! # Contents
//!
//! - [`SqliteLinkRepository`] - Link storage primitives
//! - [`pool`] - Connection pool setup and embedded migrations

pub mod pool;
pub mod sqlite_link_repository;

pub use pool::PoolSettings;
pub use sqlite_link_repository::SqliteLinkRepository;
