//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{InsertError, StorageError};
use async_trait::async_trait;

/// Storage port for short links.
///
/// Each method maps to one atomic statement against the backing store, so
/// callers never compose a read and a write for the same invariant.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a link unless its code is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::Collision`] when the storage uniqueness
    /// constraint on `code` rejects the row.
    ///
    /// Returns [`InsertError::Storage`] on any other database error.
    async fn insert(&self, new_link: NewLink) -> Result<Link, InsertError>;

    /// Finds a link by its short code without touching the click counter.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, StorageError>;

    /// Atomically adds one click to the link and returns the updated row.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with the post-increment counter if the code exists
    /// - `Ok(None)` if no link has this code
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on database errors.
    async fn increment_clicks(&self, code: &str) -> Result<Option<Link>, StorageError>;

    /// Lists up to `limit` links, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on database errors.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Link>, StorageError>;

    /// Permanently removes a link.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if the code was unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on database errors.
    async fn delete(&self, code: &str) -> Result<bool, StorageError>;

    /// Counts all stored links.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on database errors.
    async fn count(&self) -> Result<i64, StorageError>;
}
