//! Error handling and request statistics.
//!
//! This module provides:
//! - The request-level [`ApiError`] and its HTTP mapping
//! - Start-up error types (logger, configuration)
//! - Request outcome statistics
//!
//! Request errors are never fatal: each one is scoped to a single request
//! and rendered as `{"error": "<message>"}` with a fixed status code.

mod response;
mod stats;
mod types;

// Re-export public API
pub use stats::RequestStats;
pub use types::{ApiError, ConfigError, InitializationError, RequestOutcome};
