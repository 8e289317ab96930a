//! Main application modules.
//!
//! Startup logging and shutdown handling used by [`crate::run_server`].

pub mod logging;
pub mod shutdown;

// Re-export public API
pub use logging::log_startup;
pub use shutdown::{shutdown_gracefully, shutdown_signal};
