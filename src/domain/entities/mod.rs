//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`ShortUrl`] - A key → original URL mapping owned by one identity
//! - [`MetricEvent`] - One recorded resolution of a key
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! `NewShortUrl` and `NewMetricEvent` carry only the fields the caller supplies;
//! identifiers and timestamps are assigned by the store.

pub mod metric_event;
pub mod short_url;

pub use metric_event::{MetricEvent, NewMetricEvent};
pub use short_url::{NewShortUrl, ShortUrl};
