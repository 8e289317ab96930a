//! book_shelf library: a rate-limited, in-memory book catalogue API.
//!
//! The catalogue is served over HTTP with axum. Every book route is guarded
//! by a per-client fixed-window rate limiter (30 requests per 60 seconds by
//! default); clients over their quota get `429 {"error": "Too Many Requests"}`
//! before any handler runs.
//!
//! # Example
//!
//! ```no_run
//! use book_shelf::{Config, run_server};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     port: 8080,
//!     rate_limit: 5,
//!     ..Default::default()
//! };
//!
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod rate_limiter;
pub mod server;
pub mod storage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use error_handling::ApiError;
pub use run::run_server;
pub use server::{build_router, start_server, AppState};

// Internal run module (wires configuration, state and the listener together)
mod run {
    use anyhow::{Context, Result};
    use tokio::net::TcpListener;

    use crate::app::{log_startup, shutdown_gracefully, shutdown_signal};
    use crate::config::Config;
    use crate::server::{start_server, AppState};

    /// Runs the book API until Ctrl-C / SIGTERM.
    ///
    /// Validates `config`, seeds the catalogue, starts the expired-counter
    /// sweeper (if enabled), binds the listener and serves until a shutdown
    /// signal arrives. A summary of request outcomes is logged on exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the address cannot
    /// be bound, or the server fails while running.
    pub async fn run_server(config: Config) -> Result<()> {
        config.validate().context("Invalid configuration")?;
        let addr = config.bind_addr()?;

        let state = AppState::from_config(&config);
        let eviction_shutdown = config
            .evict_interval
            .filter(|every| !every.is_zero() && state.limiter.is_enabled())
            .map(|every| state.limiter.start_eviction(every));

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;
        let local_addr = listener.local_addr().unwrap_or(addr);
        log_startup(&config, local_addr);

        let result = start_server(listener, state.clone(), shutdown_signal()).await;

        shutdown_gracefully(eviction_shutdown);
        state.stats.log_summary();
        result
    }
}
