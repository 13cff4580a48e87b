//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters; schema lives in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - Short URL records
//! - [`PgMetricsRepository`] - Metric events and aggregate queries

pub mod pg_metrics_repository;
pub mod pg_url_repository;

pub use pg_metrics_repository::PgMetricsRepository;
pub use pg_url_repository::PgUrlRepository;
