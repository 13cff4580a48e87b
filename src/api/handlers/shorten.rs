//! Handlers for an owner's short URLs (create, list, delete).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::shorten::{
    ShortUrlItem, ShortUrlListResponse, ShortenRequest, ShortenResponse, is_valid_key,
};
use crate::api::middleware::OwnerId;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL for the calling owner.
///
/// # Endpoint
///
/// `POST /api/v1/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// - **201 Created**: a new record was written
/// - **200 OK**: the owner had already shortened this URL; the stored key is returned
///
/// ```json
/// {
///   "key": "EAaArVR",
///   "short_url": "http://localhost:8000/EAaArVR",
///   "original_url": "https://example.com",
///   "created": true
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is invalid.
/// Returns 401 Unauthorized without an owner.
/// Returns 409 Conflict if every candidate key is taken by other URLs.
pub async fn shorten_handler(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let creation = state
        .creation_service
        .create(&payload.url, &owner_id)
        .await?;

    let status = if creation.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(ShortenResponse {
            short_url: state.settings.short_url(&creation.record.key),
            key: creation.record.key,
            original_url: creation.record.original_url,
            created: creation.created,
        }),
    ))
}

/// Lists the owner's short URLs, newest first.
///
/// # Endpoint
///
/// `GET /api/v1/shorten?limit=10&offset=0`
///
/// # Query Parameters
///
/// - `limit` (optional): Page size, 1-100 (default: `ITEMS_PER_PAGE`)
/// - `offset` (optional): Records to skip (default: 0)
///
/// # Errors
///
/// Returns 400 Bad Request if the window is invalid.
pub async fn list_handler(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ShortUrlListResponse>, AppError> {
    let (limit, offset) = params
        .validate_and_get_limit_offset(state.settings.items_per_page)
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = state
        .creation_service
        .list(&owner_id, limit, offset)
        .await?;

    let urls = page
        .items
        .into_iter()
        .map(|record| ShortUrlItem::from_record(record, &state.settings))
        .collect();

    Ok(Json(ShortUrlListResponse {
        total: page.total,
        limit,
        offset,
        urls,
    }))
}

/// Deletes one of the owner's short URLs.
///
/// # Endpoint
///
/// `DELETE /api/v1/shorten/{key}`
///
/// # Response
///
/// **204 No Content** on success. Metric events of the key are removed with it.
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist or belongs to another owner.
pub async fn delete_handler(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(key): Path<String>,
) -> Result<StatusCode, AppError> {
    if is_valid_key(&key) && state.creation_service.delete(&key, &owner_id).await? {
        return Ok(StatusCode::NO_CONTENT);
    }

    Err(AppError::not_found(
        "Short URL not found",
        json!({ "key": key }),
    ))
}
