//! Resolution event model for asynchronous metrics recording.

use crate::domain::entities::NewMetricEvent;

/// An in-memory record of one successful resolution.
///
/// Passed from [`crate::application::services::ResolutionService`] to the
/// background worker over a bounded channel, so the redirect never waits on
/// the metrics write.
///
/// # Usage Flow
///
/// 1. Created after a key resolves, with the measured latency
/// 2. Sent to the channel (non-blocking)
/// 3. Processed by [`crate::domain::metrics_worker::run_metrics_worker`]
/// 4. Converted to [`NewMetricEvent`] for persistence
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionEvent {
    pub key: String,
    pub client_ip: String,
    pub response_time_ms: f64,
}

impl ResolutionEvent {
    pub fn new(key: String, client_ip: String, response_time_ms: f64) -> Self {
        Self {
            key,
            client_ip,
            response_time_ms,
        }
    }
}

impl From<ResolutionEvent> for NewMetricEvent {
    fn from(event: ResolutionEvent) -> Self {
        NewMetricEvent::new(event.key, event.client_ip, event.response_time_ms)
    }
}
