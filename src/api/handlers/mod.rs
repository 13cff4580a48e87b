//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod metrics;
pub mod redirect;
pub mod shorten;

pub use health::{health_handler, info_handler};
pub use metrics::{owner_average_handler, performance_handler, top_keys_handler};
pub use redirect::redirect_handler;
pub use shorten::{delete_handler, list_handler, shorten_handler};
