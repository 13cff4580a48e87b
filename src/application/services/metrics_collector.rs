//! Resolution metrics: event intake and aggregate queries.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{error, warn};

use crate::domain::repositories::{KeyHits, MetricsRepository};
use crate::domain::resolution_event::ResolutionEvent;
use crate::error::AppError;

/// Aggregate performance of one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyPerformance {
    pub key: String,
    pub total_hits: i64,
    pub unique_clients: i64,
    /// Mean response time in milliseconds; `None` when the key has no events.
    pub avg_response_time: Option<f64>,
}

/// Collects one event per successful resolution and answers aggregate queries.
///
/// Recording never blocks: events go into a bounded queue drained by
/// [`crate::domain::metrics_worker::run_metrics_worker`]. An event that
/// cannot be queued is logged and counted, never returned as an error.
pub struct MetricsCollector<M: MetricsRepository> {
    repository: Arc<M>,
    sender: mpsc::Sender<ResolutionEvent>,
}

impl<M: MetricsRepository> MetricsCollector<M> {
    pub fn new(repository: Arc<M>, sender: mpsc::Sender<ResolutionEvent>) -> Self {
        Self { repository, sender }
    }

    /// Queues an event for the background worker.
    pub fn record(&self, event: ResolutionEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("metric_events_dropped_total", "reason" => "queue_full")
                    .increment(1);
                warn!(key = %event.key, "Metrics queue full, event dropped");
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("metric_events_dropped_total", "reason" => "queue_closed")
                    .increment(1);
                error!(key = %event.key, "Metrics queue closed, event dropped");
            }
        }
    }

    /// Hit count, distinct clients and mean latency for a key.
    ///
    /// A key without events yields zero counts and no average.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on store failures.
    pub async fn performance(&self, key: &str) -> Result<KeyPerformance, AppError> {
        let (total_hits, unique_clients, avg_response_time) = tokio::try_join!(
            self.repository.count_hits(key),
            self.repository.count_unique_clients(key),
            self.repository.average_response_time_by_key(key),
        )?;

        Ok(KeyPerformance {
            key: key.to_string(),
            total_hits,
            unique_clients,
            avg_response_time,
        })
    }

    /// Up to `limit` of the owner's keys, most resolved first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` is not positive.
    /// Returns [`AppError::Unavailable`] on store failures.
    pub async fn top_keys(&self, owner_id: &str, limit: i64) -> Result<Vec<KeyHits>, AppError> {
        if limit < 1 {
            return Err(AppError::bad_request(
                "Limit must be positive",
                serde_json::json!({ "limit": limit }),
            ));
        }

        self.repository.top_keys_by_hits(owner_id, limit).await
    }

    /// Mean latency across all of an owner's keys.
    pub async fn owner_average(&self, owner_id: &str) -> Result<Option<f64>, AppError> {
        self.repository
            .average_response_time_by_owner(owner_id)
            .await
    }

    /// Free slots in the event queue.
    pub fn queue_capacity(&self) -> usize {
        self.sender.capacity()
    }

    pub fn queue_max_capacity(&self) -> usize {
        self.sender.max_capacity()
    }

    /// True once the worker has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
