//! The short-link registry: code allocation, resolution, listing, deletion.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{InsertError, RegistryError};
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::{generate_code, is_valid_code};

/// Total insert attempts for a generated code before giving up.
pub const MAX_INSERT_ATTEMPTS: usize = 10;

/// Number of links returned by [`LinkService::list`] when no limit is given.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Service for creating, resolving and managing short links.
///
/// Uniqueness of codes is owned by the storage layer: an insert that hits the
/// unique constraint comes back as [`InsertError::Collision`], which is the
/// only signal the retry loop trusts.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    site_url: String,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `site_url` is the public base used by [`Self::short_url`].
    pub fn new(link_repository: Arc<L>, site_url: impl Into<String>) -> Self {
        Self {
            link_repository,
            site_url: site_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `long_url` - The redirect target, stored exactly as given
    /// - `desired_code` - Optional custom code; used as-is or rejected, never retried
    ///
    /// # Code Generation
    ///
    /// Without a custom code a random 4-character code is drawn and inserted.
    /// A collision draws a fresh code, up to [`MAX_INSERT_ATTEMPTS`] attempts.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::EmptyLongUrl`] if `long_url` is blank
    /// - [`RegistryError::InvalidCodeFormat`] if the custom code is not 4 alphanumerics
    /// - [`RegistryError::CodeAlreadyInUse`] if the custom code is taken
    /// - [`RegistryError::ExhaustedCodeSpace`] if every generated code collided
    /// - [`RegistryError::Storage`] on database errors (never retried)
    pub async fn create(
        &self,
        long_url: String,
        desired_code: Option<String>,
    ) -> Result<Link, RegistryError> {
        if long_url.trim().is_empty() {
            return Err(RegistryError::EmptyLongUrl);
        }

        match desired_code {
            Some(code) => self.create_with_custom_code(long_url, code).await,
            None => self.create_with_generated_code(long_url).await,
        }
    }

    /// Makes one insert-if-absent attempt for `candidate`.
    ///
    /// The link is stamped with the current time and zero clicks.
    pub async fn attempt_insert(
        &self,
        candidate: String,
        long_url: &str,
    ) -> Result<Link, InsertError> {
        self.link_repository
            .insert(NewLink::now(candidate, long_url))
            .await
    }

    /// Resolves a code to its link, counting the visit.
    ///
    /// The increment and the read are a single storage operation, so
    /// concurrent resolutions never lose clicks.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with the post-increment click count
    /// - `Ok(None)` if no link has this code
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] on database errors.
    pub async fn resolve(&self, code: &str) -> Result<Option<Link>, RegistryError> {
        if !is_valid_code(code) {
            return Ok(None);
        }

        Ok(self.link_repository.increment_clicks(code).await?)
    }

    /// Looks up a link without counting a visit.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] on database errors.
    pub async fn peek(&self, code: &str) -> Result<Option<Link>, RegistryError> {
        if !is_valid_code(code) {
            return Ok(None);
        }

        Ok(self.link_repository.find_by_code(code).await?)
    }

    /// Lists up to `limit` links, newest first.
    ///
    /// A non-positive limit yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] on database errors.
    pub async fn list(&self, limit: i64) -> Result<Vec<Link>, RegistryError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }

        Ok(self.link_repository.list_recent(limit).await?)
    }

    /// Deletes a link.
    ///
    /// Returns `Ok(true)` if a link was removed and `Ok(false)` if there was
    /// nothing to remove; deleting twice is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] on database errors.
    pub async fn delete(&self, code: &str) -> Result<bool, RegistryError> {
        if !is_valid_code(code) {
            return Ok(false);
        }

        Ok(self.link_repository.delete(code).await?)
    }

    /// Counts all stored links.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] on database errors.
    pub async fn count(&self) -> Result<i64, RegistryError> {
        Ok(self.link_repository.count().await?)
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/s/{}", self.site_url, code)
    }

    async fn create_with_custom_code(
        &self,
        long_url: String,
        code: String,
    ) -> Result<Link, RegistryError> {
        if !is_valid_code(&code) {
            return Err(RegistryError::InvalidCodeFormat { code });
        }

        match self.attempt_insert(code.clone(), &long_url).await {
            Ok(link) => Ok(link),
            Err(InsertError::Collision { .. }) => Err(RegistryError::CodeAlreadyInUse { code }),
            Err(InsertError::Storage(e)) => Err(e.into()),
        }
    }

    async fn create_with_generated_code(&self, long_url: String) -> Result<Link, RegistryError> {
        for _ in 0..MAX_INSERT_ATTEMPTS {
            match self.attempt_insert(generate_code(), &long_url).await {
                Ok(link) => return Ok(link),
                Err(InsertError::Collision { .. }) => continue,
                Err(InsertError::Storage(e)) => return Err(e.into()),
            }
        }

        Err(RegistryError::ExhaustedCodeSpace {
            attempts: MAX_INSERT_ATTEMPTS,
        })
    }
}
