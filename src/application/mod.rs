//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, the cache and key derivation, and
//! expose the operations used by HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::creation_service::CreationService`] - Idempotent creation, listing and deletion
//! - [`services::resolution_service::ResolutionService`] - Cache-aside key resolution
//! - [`services::metrics_collector::MetricsCollector`] - Resolution events and aggregates

pub mod services;
