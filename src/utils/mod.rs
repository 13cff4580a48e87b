//! Utility functions for key derivation, URL validation, and request handling.
//!
//! This module provides helper functions used across the application:
//!
//! - [`key_deriver`] - Deterministic short key derivation
//! - [`url_validator`] - Original URL validation
//! - [`client_ip`] - Client address extraction for metrics

pub mod client_ip;
pub mod key_deriver;
pub mod url_validator;
