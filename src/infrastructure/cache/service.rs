//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// Any of these means the cache is unavailable for the current operation.
/// Callers degrade to the record store and never surface them.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching key → original URL mappings.
///
/// The cache is advisory and never the system of record: entries may be
/// stale or missing at any time and are repaired from the record store.
/// Implementations must be safe for concurrent use; each call acquires its
/// connection for the duration of the call only and releases it on every
/// exit path.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache with TTL and capacity bound
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend cannot be reached.
    async fn get_url(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping with optional TTL.
    ///
    /// # Arguments
    ///
    /// - `key` - The short key
    /// - `original_url` - The full URL to cache
    /// - `ttl_seconds` - Optional TTL in seconds (implementation default if None)
    async fn set_url(
        &self,
        key: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached mapping.
    ///
    /// Used when a record is deleted so stale entries are not served.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and status endpoints.
    fn backend(&self) -> &'static str;
}
