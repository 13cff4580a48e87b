//! DTOs for short URL creation, listing and deletion.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::ShortUrl;
use crate::state::AppSettings;

/// Shape of a key accepted in request paths.
static KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{4,16}$").expect("key regex is valid"));

/// Returns true if `key` could have been produced by the key deriver.
pub fn is_valid_key(key: &str) -> bool {
    KEY_REGEX.is_match(key)
}

/// Request to shorten a URL for the calling owner.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL (absolute HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: String,
}

/// Result of a creation request.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub key: String,
    pub short_url: String,
    pub original_url: String,
    /// `false` when the owner had already shortened this URL.
    pub created: bool,
}

/// One record in a listing.
#[derive(Debug, Serialize)]
pub struct ShortUrlItem {
    pub key: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortUrlItem {
    pub fn from_record(record: ShortUrl, settings: &AppSettings) -> Self {
        Self {
            short_url: settings.short_url(&record.key),
            key: record.key,
            original_url: record.original_url,
            created_at: record.created_at,
        }
    }
}

/// A page of the owner's records.
#[derive(Debug, Serialize)]
pub struct ShortUrlListResponse {
    /// All records of the owner, independent of the window.
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub urls: Vec<ShortUrlItem>,
}
