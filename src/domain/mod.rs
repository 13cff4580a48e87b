//! Domain layer containing business entities and logic.
//!
//! It defines entities, repository interfaces and the metrics pipeline
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`resolution_event`] - Message sent for every successful resolution
//! - [`metrics_worker`] - Asynchronous metric persistence worker
//!
//! # Metrics Flow
//!
//! 1. [`crate::application::services::ResolutionService`] resolves a key
//! 2. A [`resolution_event::ResolutionEvent`] is queued on a bounded channel
//! 3. [`metrics_worker::run_metrics_worker`] persists it with retry logic
//! 4. Events land in the store via [`repositories::MetricsRepository`]

pub mod entities;
pub mod metrics_worker;
pub mod repositories;
pub mod resolution_event;
