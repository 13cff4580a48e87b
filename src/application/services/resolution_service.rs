//! Cache-aside resolution of keys to original URLs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::debug;

use crate::application::services::MetricsCollector;
use crate::domain::repositories::{MetricsRepository, UrlRepository};
use crate::domain::resolution_event::ResolutionEvent;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Where a resolved URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    Store,
}

/// A successfully resolved key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub original_url: String,
    pub source: ResolutionSource,
}

/// Resolves keys through the cache, falling back to the record store.
///
/// # Paths
///
/// - **Hit**: the cache returns the URL; the store is not touched.
/// - **Miss**: the store is read and, if the key exists, the cache is
///   populated before returning.
/// - **Cache unavailable** (error or timeout): handled as a miss, except the
///   populate step is skipped.
///
/// Every successful resolution is reported to the [`MetricsCollector`].
pub struct ResolutionService<R: UrlRepository, M: MetricsRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    collector: Arc<MetricsCollector<M>>,
    store_timeout: Duration,
    cache_timeout: Duration,
}

impl<R: UrlRepository, M: MetricsRepository> ResolutionService<R, M> {
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        collector: Arc<MetricsCollector<M>>,
        store_timeout: Duration,
        cache_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            collector,
            store_timeout,
            cache_timeout,
        }
    }

    /// Resolves a key with the configured store deadline.
    ///
    /// See [`Self::resolve_with_timeout`].
    pub async fn resolve(
        &self,
        key: &str,
        client_ip: &str,
    ) -> Result<Option<Resolution>, AppError> {
        self.resolve_with_timeout(key, client_ip, self.store_timeout)
            .await
    }

    /// Resolves a key, bounding the store read by `store_deadline`.
    ///
    /// Returns `Ok(None)` when the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the store fails or the deadline
    /// elapses. A timeout is never reported as "not found".
    pub async fn resolve_with_timeout(
        &self,
        key: &str,
        client_ip: &str,
        store_deadline: Duration,
    ) -> Result<Option<Resolution>, AppError> {
        let started = Instant::now();
        metrics::counter!("resolutions_total").increment(1);

        let cache_available = match timeout(self.cache_timeout, self.cache.get_url(key)).await {
            Ok(Ok(Some(original_url))) => {
                metrics::counter!("cache_hits_total").increment(1);
                debug!(key = %key, backend = self.cache.backend(), "Cache hit");
                self.report(key, client_ip, started);
                return Ok(Some(Resolution {
                    original_url,
                    source: ResolutionSource::Cache,
                }));
            }
            Ok(Ok(None)) => {
                metrics::counter!("cache_misses_total").increment(1);
                debug!(key = %key, "Cache miss");
                true
            }
            Ok(Err(e)) => {
                metrics::counter!("cache_errors_total").increment(1);
                debug!(key = %key, error = %e, "Cache unavailable, reading store");
                false
            }
            Err(_) => {
                metrics::counter!("cache_errors_total").increment(1);
                debug!(key = %key, "Cache lookup timed out, reading store");
                false
            }
        };

        let Some(original_url) = timeout(store_deadline, self.repository.find_by_key(key)).await??
        else {
            debug!(key = %key, "Key not found");
            return Ok(None);
        };

        if cache_available {
            self.populate(key, &original_url).await;
        }

        self.report(key, client_ip, started);

        Ok(Some(Resolution {
            original_url,
            source: ResolutionSource::Store,
        }))
    }

    async fn populate(&self, key: &str, original_url: &str) {
        match timeout(self.cache_timeout, self.cache.set_url(key, original_url, None)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                metrics::counter!("cache_errors_total").increment(1);
                debug!(key = %key, error = %e, "Failed to populate cache");
            }
            Err(_) => {
                metrics::counter!("cache_errors_total").increment(1);
                debug!(key = %key, "Cache populate timed out");
            }
        }
    }

    fn report(&self, key: &str, client_ip: &str, started: Instant) {
        let response_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.collector.record(ResolutionEvent::new(
            key.to_string(),
            client_ip.to_string(),
            response_time_ms,
        ));
    }
}
