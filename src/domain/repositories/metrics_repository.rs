//! Repository trait for resolution metrics and aggregates.

use crate::domain::entities::NewMetricEvent;
use crate::error::AppError;
use async_trait::async_trait;
use serde::Serialize;

/// Hit count of one key, as returned by [`MetricsRepository::top_keys_by_hits`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyHits {
    pub key: String,
    pub hit_count: i64,
}

/// Repository interface for the append-only metric events.
///
/// Aggregates tolerate keys without events: counts are zero and averages are
/// `None`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMetricsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_metrics.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Appends one event, attributing it to the key's current owner.
    ///
    /// Returns `Ok(false)` when the key does not exist and nothing was written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on database errors.
    async fn record_metric(&self, event: NewMetricEvent) -> Result<bool, AppError>;

    /// Counts events for a key.
    async fn count_hits(&self, key: &str) -> Result<i64, AppError>;

    /// Counts distinct client IPs for a key.
    async fn count_unique_clients(&self, key: &str) -> Result<i64, AppError>;

    /// Average response time in milliseconds for a key.
    async fn average_response_time_by_key(&self, key: &str) -> Result<Option<f64>, AppError>;

    /// Average response time in milliseconds across all keys of an owner.
    async fn average_response_time_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Option<f64>, AppError>;

    /// Most resolved keys of an owner, by hit count descending then key.
    async fn top_keys_by_hits(&self, owner_id: &str, limit: i64)
    -> Result<Vec<KeyHits>, AppError>;
}
