//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::creation_service::MAX_PAGE_SIZE;

/// Limit/offset window for listing endpoints.
///
/// Uses `serde_with` to parse numbers from query strings.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Validates the window and fills in defaults.
    ///
    /// # Validation
    ///
    /// - `limit` must be between 1 and 100 (default: `default_limit`)
    /// - `offset` must not be negative (default: 0)
    ///
    /// # Returns
    ///
    /// `(limit, offset)` tuple for SQL queries.
    pub fn validate_and_get_limit_offset(&self, default_limit: i64) -> Result<(i64, i64), String> {
        let limit = self.limit.unwrap_or(default_limit);
        let offset = self.offset.unwrap_or(0);

        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(format!("Limit must be between 1 and {}", MAX_PAGE_SIZE));
        }

        if offset < 0 {
            return Err("Offset must not be negative".to_string());
        }

        Ok((limit, offset))
    }
}

/// Single `limit` parameter for top-N queries.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}
