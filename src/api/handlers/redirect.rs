//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};
use serde_json::json;
use std::net::SocketAddr;

use crate::api::dto::shorten::is_valid_key;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a key to its original URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// # Request Flow
///
/// 1. Reject keys that cannot exist (wrong length or alphabet) as not found
/// 2. Resolve through the cache, falling back to the record store
/// 3. Queue a metric event with client IP and latency
/// 4. Return 307 Temporary Redirect
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
/// Returns 503 Service Unavailable if the store fails or times out.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_key(&key) {
        return Err(not_found(&key));
    }

    let ip = client_ip(&headers, addr, state.settings.behind_proxy);

    match state.resolution_service.resolve(&key, &ip).await? {
        Some(resolution) => Ok(Redirect::temporary(&resolution.original_url)),
        None => Err(not_found(&key)),
    }
}

fn not_found(key: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "key": key }))
}
