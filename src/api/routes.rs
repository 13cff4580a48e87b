//! API route configuration.
//!
//! Owner-scoped endpoints read the caller from the `X-Owner-Id` header via
//! the [`crate::api::middleware::OwnerId`] extractor.

use crate::api::handlers::{
    delete_handler, info_handler, list_handler, owner_average_handler, performance_handler,
    shorten_handler, top_keys_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// Versioned API routes, mounted under `/api/v1`.
///
/// # Endpoints
///
/// - `POST   /shorten`                    - Create (or return) the owner's short URL
/// - `GET    /shorten`                    - List the owner's short URLs (paginated)
/// - `DELETE /shorten/{key}`              - Delete one of the owner's short URLs
/// - `GET    /metrics/performance/{key}`  - Hits, unique clients and mean latency of a key
/// - `GET    /metrics/top`                - The owner's most resolved keys
/// - `GET    /metrics/average`            - The owner's mean response time
/// - `GET    /info`                       - Service information
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", get(list_handler).post(shorten_handler))
        .route("/shorten/{key}", delete(delete_handler))
        .route("/metrics/performance/{key}", get(performance_handler))
        .route("/metrics/top", get(top_keys_handler))
        .route("/metrics/average", get(owner_average_handler))
        .route("/info", get(info_handler))
}
