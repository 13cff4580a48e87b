//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. Together they form the record
//! store: the durable source of truth for URL records and their metric events.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - Short URL records
//! - [`MetricsRepository`] - Resolution events and aggregates
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod metrics_repository;
pub mod url_repository;

pub use metrics_repository::{KeyHits, MetricsRepository};
pub use url_repository::{InsertOutcome, OwnerPage, UrlRepository};

#[cfg(test)]
pub use metrics_repository::MockMetricsRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
