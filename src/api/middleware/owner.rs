//! Owner identity extraction.
//!
//! Authentication happens upstream: a gateway verifies the caller's token and
//! forwards the resulting identity in the `X-Owner-Id` header. This service
//! trusts that header and treats its value as an opaque string.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde_json::json;

use crate::error::AppError;

/// Header carrying the authenticated owner id.
pub const OWNER_HEADER: &str = "x-owner-id";

/// Longest accepted owner id; matches the `owner_id` column width.
const MAX_OWNER_LENGTH: usize = 255;

/// The calling owner, taken from the `X-Owner-Id` header.
///
/// # Errors
///
/// Rejects with `401 Unauthorized` if the header is missing, not valid
/// UTF-8, blank or longer than 255 bytes.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OwnerId(owner): OwnerId) -> String {
///     owner
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerId(pub String);

impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let owner = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= MAX_OWNER_LENGTH)
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "X-Owner-Id header is missing or invalid" }),
                )
            })?;

        Ok(OwnerId(owner.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<OwnerId, AppError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(OWNER_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        OwnerId::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_owner_from_header() {
        assert_eq!(extract(Some(" u1 ")).await.unwrap(), OwnerId("u1".to_string()));
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        assert!(matches!(
            extract(None).await,
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[tokio::test]
    async fn test_blank_or_oversized_header_is_unauthorized() {
        assert!(extract(Some("   ")).await.is_err());
        assert!(extract(Some(&"x".repeat(256))).await.is_err());
    }
}
