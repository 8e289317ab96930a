//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_HOST, DEFAULT_PAGE_SIZE, DEFAULT_PORT, EVICTION_INTERVAL_SECS,
    RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECS, SEED_BOOK_COUNT,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options.
///
/// Every flag can also be supplied through a `BOOK_SHELF_*` environment
/// variable (or a `.env` file next to the binary).
///
/// # Examples
///
/// ```bash
/// # Defaults: 0.0.0.0:5001, 30 requests per 60s per client
/// book_shelf
///
/// # Tighter limit on a different port
/// book_shelf --port 8080 --rate-limit 5 --rate-window-secs 10
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "book_shelf",
    about = "Serves an in-memory book catalogue behind a per-client rate limiter."
)]
pub struct Opt {
    /// Interface to bind
    #[arg(long, env = "BOOK_SHELF_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "BOOK_SHELF_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Requests allowed per client and route group per window (0 disables limiting)
    #[arg(long, env = "BOOK_SHELF_RATE_LIMIT", default_value_t = RATE_LIMIT_MAX_REQUESTS)]
    pub rate_limit: u32,

    /// Rate-limit window length in seconds
    #[arg(long, env = "BOOK_SHELF_RATE_WINDOW_SECS", default_value_t = RATE_LIMIT_WINDOW_SECS)]
    pub rate_window_secs: u64,

    /// Default page size for the list endpoint
    #[arg(long, env = "BOOK_SHELF_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Number of placeholder books loaded at startup
    #[arg(long, env = "BOOK_SHELF_SEED_BOOKS", default_value_t = SEED_BOOK_COUNT)]
    pub seed_books: usize,

    /// Seconds between sweeps of expired rate-limit counters (0 disables)
    #[arg(long, env = "BOOK_SHELF_EVICT_INTERVAL_SECS", default_value_t = EVICTION_INTERVAL_SECS)]
    pub evict_interval_secs: u64,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without going through `clap`.
///
/// # Examples
///
/// ```no_run
/// use book_shelf::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     port: 8080,
///     rate_limit: 5,
///     rate_window: Duration::from_secs(10),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Requests allowed per client and route group per window (0 disables limiting)
    pub rate_limit: u32,

    /// Rate-limit window length
    pub rate_window: Duration,

    /// Default page size for the list endpoint
    pub page_size: usize,

    /// Number of placeholder books loaded at startup
    pub seed_books: usize,

    /// Interval between sweeps of expired rate-limit counters (`None` disables)
    pub evict_interval: Option<Duration>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            rate_limit: RATE_LIMIT_MAX_REQUESTS,
            rate_window: Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            seed_books: SEED_BOOK_COUNT,
            evict_interval: Some(Duration::from_secs(EVICTION_INTERVAL_SECS)),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            host: opt.host,
            port: opt.port,
            rate_limit: opt.rate_limit,
            rate_window: Duration::from_secs(opt.rate_window_secs),
            page_size: opt.page_size,
            seed_books: opt.seed_books,
            evict_interval: match opt.evict_interval_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}

impl Config {
    /// Checks values that `clap` cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_window.is_zero() {
            return Err(ConfigError::ZeroRateWindow);
        }
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        self.bind_addr()?;
        Ok(())
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(format!("{}:{}", self.host, self.port)))
    }
}
