//! Handlers for health check and service information endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::api::dto::info::InfoResponse;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: `SELECT 1` round trip
/// 2. **Cache**: backend ping
/// 3. **Metrics Queue**: channel open, free capacity
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "cache": { "status": "ok", "message": "redis reachable" },
///     "metrics_queue": { "status": "ok", "message": "Free slots: 10000/10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let cache = check_cache(&state).await;
    let metrics_queue = check_metrics_queue(&state);

    let all_healthy = database.is_ok() && cache.is_ok() && metrics_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            cache,
            metrics_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.check_store().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    let backend = state.cache.backend();
    if state.cache.health_check().await {
        CheckStatus::ok(format!("{} reachable", backend))
    } else {
        CheckStatus::error(format!("{} unreachable", backend))
    }
}

fn check_metrics_queue(state: &AppState) -> CheckStatus {
    let collector = &state.metrics_collector;
    if collector.is_closed() {
        CheckStatus::error("Metrics queue is closed")
    } else {
        CheckStatus::ok(format!(
            "Free slots: {}/{}",
            collector.queue_capacity(),
            collector.queue_max_capacity()
        ))
    }
}

/// Describes this deployment.
///
/// # Endpoint
///
/// `GET /api/v1/info`
pub async fn info_handler(State(state): State<AppState>) -> Json<InfoResponse> {
    let settings = &state.settings;

    Json(InfoResponse {
        app_name: settings.app_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        admin_email: settings.admin_email.clone(),
        items_per_page: settings.items_per_page,
        top_keys_limit: settings.top_keys_limit,
        cache_backend: state.cache.backend().to_string(),
    })
}
