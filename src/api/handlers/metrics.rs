//! Handlers for resolution metrics.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::metrics::{OwnerAverageResponse, PerformanceResponse, TopKeyEntry};
use crate::api::dto::pagination::LimitParams;
use crate::api::dto::shorten::is_valid_key;
use crate::api::middleware::OwnerId;
use crate::error::AppError;
use crate::state::AppState;

/// Hit count, distinct clients and mean latency of a key.
///
/// # Endpoint
///
/// `GET /api/v1/metrics/performance/{key}`
///
/// A key that was never resolved reports zero hits and a `null` average.
///
/// # Errors
///
/// Returns 400 Bad Request if the key is malformed.
pub async fn performance_handler(
    State(state): State<AppState>,
    _owner: OwnerId,
    Path(key): Path<String>,
) -> Result<Json<PerformanceResponse>, AppError> {
    if !is_valid_key(&key) {
        return Err(AppError::bad_request(
            "Invalid key format",
            json!({ "key": key }),
        ));
    }

    let performance = state.metrics_collector.performance(&key).await?;

    Ok(Json(performance.into()))
}

/// The owner's most resolved keys.
///
/// # Endpoint
///
/// `GET /api/v1/metrics/top?limit=5`
///
/// # Query Parameters
///
/// - `limit` (optional): 1-100 (default: `TOP_KEYS_LIMIT`)
///
/// # Response
///
/// Highest hit count first, ties by key:
///
/// ```json
/// [{ "key": "EAaArVR", "hit_count": 12 }, { "key": "x9_Kq2a", "hit_count": 4 }]
/// ```
pub async fn top_keys_handler(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<TopKeyEntry>>, AppError> {
    let limit = params.limit.unwrap_or(state.settings.top_keys_limit);
    if !(1..=100).contains(&limit) {
        return Err(AppError::bad_request(
            "Limit must be between 1 and 100",
            json!({ "limit": limit }),
        ));
    }

    let keys = state.metrics_collector.top_keys(&owner_id, limit).await?;

    Ok(Json(keys))
}

/// Mean response time over all of the owner's keys.
///
/// # Endpoint
///
/// `GET /api/v1/metrics/average`
pub async fn owner_average_handler(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
) -> Result<Json<OwnerAverageResponse>, AppError> {
    let avg_response_time = state.metrics_collector.owner_average(&owner_id).await?;

    Ok(Json(OwnerAverageResponse {
        owner_id,
        avg_response_time,
    }))
}
