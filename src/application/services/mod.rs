//! Business logic services for the application layer.

pub mod creation_service;
pub mod metrics_collector;
pub mod resolution_service;

pub use creation_service::{Creation, CreationService};
pub use metrics_collector::{KeyPerformance, MetricsCollector};
pub use resolution_service::{Resolution, ResolutionService, ResolutionSource};
