//! DTO for the service information endpoint.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub app_name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,
    pub items_per_page: i64,
    pub top_keys_limit: i64,
    pub cache_backend: String,
}
