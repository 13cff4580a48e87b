//! Repository trait for short URL records.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Result of a conflict-aware insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was written.
    Created(ShortUrl),
    /// The same `(original_url, owner_id)` pair already had a record,
    /// typically written by a concurrent creation. Nothing was inserted.
    Existing(ShortUrl),
    /// The key belongs to a different pair. Nothing was inserted.
    KeyTaken,
}

/// One page of an owner's records plus the owner's full record count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerPage {
    pub total: i64,
    pub items: Vec<ShortUrl>,
}

/// Repository interface for the durable key → URL mapping.
///
/// This is the source of truth: caches are repaired from it on every miss.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds the record for an `(original_url, owner_id)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on database errors.
    async fn find_by_url_and_owner(
        &self,
        original_url: &str,
        owner_id: &str,
    ) -> Result<Option<ShortUrl>, AppError>;

    /// Finds the original URL for a key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on database errors.
    async fn find_by_key(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Inserts a record, relying on the store's uniqueness constraints.
    ///
    /// Never overwrites: a clash on either the key or the pair is reported
    /// through [`InsertOutcome`] instead of an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on database errors.
    async fn insert(&self, new_url: NewShortUrl) -> Result<InsertOutcome, AppError>;

    /// Lists an owner's records, newest first.
    ///
    /// `total` counts every record of the owner regardless of the window.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on database errors.
    async fn list_by_owner(
        &self,
        owner_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<OwnerPage, AppError>;

    /// Deletes a record if `owner_id` owns it. Metric events cascade.
    ///
    /// Returns `Ok(true)` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on database errors.
    async fn delete(&self, key: &str, owner_id: &str) -> Result<bool, AppError>;

    /// Checks store connectivity.
    async fn ping(&self) -> Result<(), AppError>;
}
