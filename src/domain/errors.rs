//! Error taxonomy of the short-link registry and its storage port.

use thiserror::Error;

/// Failure of a storage operation that is not a uniqueness collision.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Outcome of a single insert-if-absent attempt.
///
/// The repository classifies a uniqueness violation on `code` as
/// [`InsertError::Collision`]; everything else is [`InsertError::Storage`].
#[derive(Debug, Error)]
pub enum InsertError {
    #[error("short code '{code}' is already taken")]
    Collision { code: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors surfaced by [`crate::application::services::LinkService`].
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("longUrl is required")]
    EmptyLongUrl,

    #[error("Custom code must be 4 alphanumeric characters")]
    InvalidCodeFormat { code: String },

    #[error("Code already in use")]
    CodeAlreadyInUse { code: String },

    #[error("Failed to generate unique code after {attempts} attempts")]
    ExhaustedCodeSpace { attempts: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
