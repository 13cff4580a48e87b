//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod health;
pub mod info;
pub mod metrics;
pub mod pagination;
pub mod shorten;
