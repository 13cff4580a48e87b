//! Short URL creation, listing and deletion.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::{InsertOutcome, OwnerPage, UrlRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::key_deriver::KeyDeriver;
use crate::utils::url_validator::validate_url;

/// Number of candidate keys tried before a creation fails with a conflict.
pub const MAX_KEY_ATTEMPTS: u32 = 5;

/// Largest page accepted by [`CreationService::list`].
pub const MAX_PAGE_SIZE: i64 = 100;

/// Result of [`CreationService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creation {
    pub record: ShortUrl,
    /// `false` when the pair already had a record and nothing was written.
    pub created: bool,
}

/// Service for the owner-facing lifecycle of short URL records.
///
/// Creation is idempotent per `(original_url, owner_id)` pair: the store's
/// uniqueness constraints decide races, and the loser receives the winner's
/// record instead of an error.
pub struct CreationService<R: UrlRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    deriver: KeyDeriver,
}

impl<R: UrlRepository> CreationService<R> {
    /// Creates a new creation service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>, deriver: KeyDeriver) -> Self {
        Self {
            repository,
            cache,
            deriver,
        }
    }

    /// Returns the key the pair maps to, creating the record if needed.
    ///
    /// # Key collisions
    ///
    /// If the derived key already belongs to a different pair, the next
    /// candidate from [`KeyDeriver::derive_with_attempt`] is tried, up to
    /// [`MAX_KEY_ATTEMPTS`] candidates. Another pair's record is never
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute HTTP(S)
    /// URL or the owner is empty.
    /// Returns [`AppError::Conflict`] if every candidate key is taken.
    /// Returns [`AppError::Unavailable`] on store failures.
    pub async fn create(&self, original_url: &str, owner_id: &str) -> Result<Creation, AppError> {
        let original_url = normalize_url(original_url)?;

        if owner_id.trim().is_empty() {
            return Err(AppError::bad_request(
                "Owner id must not be empty",
                json!({}),
            ));
        }

        if let Some(existing) = self
            .repository
            .find_by_url_and_owner(&original_url, owner_id)
            .await?
        {
            debug!(key = %existing.key, "Pair already shortened");
            return Ok(Creation {
                record: existing,
                created: false,
            });
        }

        for attempt in 0..MAX_KEY_ATTEMPTS {
            let key = self
                .deriver
                .derive_with_attempt(&original_url, owner_id, attempt);

            let outcome = self
                .repository
                .insert(NewShortUrl {
                    key: key.clone(),
                    original_url: original_url.clone(),
                    owner_id: owner_id.to_string(),
                })
                .await?;

            match outcome {
                InsertOutcome::Created(record) => {
                    info!(key = %record.key, attempt, "Short URL created");
                    return Ok(Creation {
                        record,
                        created: true,
                    });
                }
                InsertOutcome::Existing(record) => {
                    debug!(key = %record.key, "Concurrent creation won, returning existing record");
                    return Ok(Creation {
                        record,
                        created: false,
                    });
                }
                InsertOutcome::KeyTaken => {
                    metrics::counter!("key_collisions_total").increment(1);
                    warn!(key = %key, attempt, "Derived key owned by another pair");
                }
            }
        }

        Err(AppError::conflict(
            "Derived key collides with an existing record",
            json!({ "attempts": MAX_KEY_ATTEMPTS }),
        ))
    }

    /// Lists an owner's records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` is outside `1..=100` or
    /// `offset` is negative.
    /// Returns [`AppError::Unavailable`] on store failures.
    pub async fn list(
        &self,
        owner_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<OwnerPage, AppError> {
        if !(1..=MAX_PAGE_SIZE).contains(&limit) || offset < 0 {
            return Err(AppError::bad_request(
                "Invalid pagination window",
                json!({ "limit": limit, "offset": offset, "max_limit": MAX_PAGE_SIZE }),
            ));
        }

        self.repository.list_by_owner(owner_id, limit, offset).await
    }

    /// Deletes a record owned by `owner_id` and evicts its cache entry.
    ///
    /// Returns `Ok(false)` when no such record exists or it belongs to
    /// another owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on store failures. Cache failures
    /// are logged only.
    pub async fn delete(&self, key: &str, owner_id: &str) -> Result<bool, AppError> {
        let deleted = self.repository.delete(key, owner_id).await?;

        if deleted {
            if let Err(e) = self.cache.invalidate(key).await {
                metrics::counter!("cache_errors_total").increment(1);
                warn!(key = %key, error = %e, "Failed to evict deleted key from cache");
            }
            info!(key = %key, "Short URL deleted");
        }

        Ok(deleted)
    }

    /// Derives the primary key for a pair without touching the store.
    ///
    /// The URL is normalized first, exactly as [`Self::create`] does.
    pub fn derive_key(&self, original_url: &str, owner_id: &str) -> Result<String, AppError> {
        Ok(self.deriver.derive(&normalize_url(original_url)?, owner_id))
    }
}

fn normalize_url(original_url: &str) -> Result<String, AppError> {
    validate_url(original_url).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })
}
