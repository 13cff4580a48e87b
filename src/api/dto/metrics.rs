//! DTOs for resolution metrics endpoints.

use serde::Serialize;

use crate::application::services::KeyPerformance;
use crate::domain::repositories::KeyHits;

/// Aggregates for a single key.
#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    pub key: String,
    pub total_hits: i64,
    pub unique_clients: i64,
    /// Milliseconds; `null` when the key was never resolved.
    pub avg_response_time: Option<f64>,
}

impl From<KeyPerformance> for PerformanceResponse {
    fn from(p: KeyPerformance) -> Self {
        Self {
            key: p.key,
            total_hits: p.total_hits,
            unique_clients: p.unique_clients,
            avg_response_time: p.avg_response_time,
        }
    }
}

/// One entry of the top keys list: `[{ "key": "...", "hit_count": 3 }, ...]`.
pub type TopKeyEntry = KeyHits;

/// Mean response time across all of an owner's keys.
#[derive(Debug, Serialize)]
pub struct OwnerAverageResponse {
    pub owner_id: String,
    pub avg_response_time: Option<f64>,
}
