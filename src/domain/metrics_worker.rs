//! Background worker persisting resolution events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::entities::NewMetricEvent;
use crate::domain::repositories::MetricsRepository;
use crate::domain::resolution_event::ResolutionEvent;
use crate::error::AppError;

/// Retries after the first failed write.
const MAX_RETRIES: usize = 3;

/// Consumes resolution events until every sender is dropped.
///
/// Up to `concurrency` writes run at once. Retryable store failures are
/// retried with jittered exponential backoff; every event that still cannot
/// be written is logged. In-flight writes finish before the function returns,
/// so awaiting it drains the queue.
pub async fn run_metrics_worker(
    mut rx: mpsc::Receiver<ResolutionEvent>,
    repository: Arc<dyn MetricsRepository>,
    concurrency: usize,
) {
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let repository = repository.clone();

        tokio::spawn(async move {
            let _permit = permit;
            persist_event(repository.as_ref(), event).await;
        });
    }

    // Wait for in-flight writes.
    let _ = semaphore.acquire_many(concurrency as u32).await;
    info!("Metrics worker stopped");
}

/// Writes one event, retrying transient failures.
async fn persist_event(repository: &dyn MetricsRepository, event: ResolutionEvent) {
    let key = event.key.clone();
    let new_event: NewMetricEvent = event.into();

    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(MAX_RETRIES);

    let result = RetryIf::start(
        strategy,
        || repository.record_metric(new_event.clone()),
        |e: &AppError| e.is_retryable(),
    )
    .await;

    match result {
        Ok(true) => {
            metrics::counter!("metric_events_written_total").increment(1);
            debug!(key = %key, "Metric event recorded");
        }
        Ok(false) => {
            metrics::counter!("metric_events_dropped_total", "reason" => "unknown_key")
                .increment(1);
            warn!(key = %key, "Metric event dropped: key does not exist");
        }
        Err(e) => {
            metrics::counter!("metric_events_dropped_total", "reason" => "write_failed")
                .increment(1);
            error!(key = %key, error = %e, "Failed to record metric event");
        }
    }
}
