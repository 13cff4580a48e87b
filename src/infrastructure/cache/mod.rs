//! Caching layer for fast key lookups.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Shared Redis-backed cache
//! - [`MemoryCache`] - In-process moka cache
//! - [`NullCache`] - No-op implementation for disabled caching

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

use crate::config::{CacheBackend, Config};
use std::sync::Arc;
use tracing::{info, warn};

/// Builds the cache selected by `CACHE_BACKEND`.
///
/// A Redis backend that cannot be reached at startup is replaced by a
/// [`MemoryCache`]; the service keeps running since the cache is advisory.
pub async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let memory = || {
        Arc::new(MemoryCache::new(
            config.cache_max_capacity,
            config.cache_ttl_seconds,
        )) as Arc<dyn CacheService>
    };

    match (config.cache_backend, config.redis_url.as_deref()) {
        (CacheBackend::Redis, Some(redis_url)) => {
            match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
                Ok(cache) => Arc::new(cache),
                Err(e) => {
                    warn!("Redis unavailable, falling back to memory cache: {}", e);
                    memory()
                }
            }
        }
        (CacheBackend::Redis, None) => {
            warn!("Redis backend selected without REDIS_URL, using memory cache");
            memory()
        }
        (CacheBackend::Memory, _) => {
            info!("Using in-process memory cache");
            memory()
        }
        (CacheBackend::None, _) => Arc::new(NullCache::new()),
    }
}
