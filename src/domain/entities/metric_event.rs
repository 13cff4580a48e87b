//! Metric event entity representing a single successful resolution.

use chrono::{DateTime, Utc};

/// One recorded resolution of a key.
///
/// Append-only. `owner_id` is copied from the owning record at write time and
/// rows disappear only through the cascade when that record is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricEvent {
    pub id: i64,
    pub key: String,
    pub owner_id: String,
    pub client_ip: String,
    /// Resolution latency in milliseconds, never negative.
    pub response_time: f64,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a metric event.
///
/// The owner is not part of the input: the store resolves it from `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMetricEvent {
    pub key: String,
    pub client_ip: String,
    pub response_time: f64,
}

impl NewMetricEvent {
    /// Creates a new event, clamping the latency to be non-negative.
    pub fn new(key: impl Into<String>, client_ip: impl Into<String>, response_time: f64) -> Self {
        Self {
            key: key.into(),
            client_ip: client_ip.into(),
            response_time: response_time.max(0.0),
        }
    }
}
