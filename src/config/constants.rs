//! Configuration constants.
//!
//! Defaults for the listener, the rate limiter and the list endpoint. Every
//! value here can be overridden from the command line or the environment.

use std::time::Duration;

/// Interface the server binds to (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Port the server listens on
pub const DEFAULT_PORT: u16 = 5001;

// Rate limiting
/// Requests allowed per client and route group within one window
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 30;
/// Length of one fixed rate-limit window in seconds
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;
/// Length of one fixed rate-limit window
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(RATE_LIMIT_WINDOW_SECS);
/// How often expired rate-limit counters are swept, in seconds (0 disables)
pub const EVICTION_INTERVAL_SECS: u64 = 300;

// Listing
/// Page requested when `page` is absent
pub const DEFAULT_PAGE: usize = 1;
/// Page size used when `limit` is absent
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of placeholder books the catalogue starts with
pub const SEED_BOOK_COUNT: usize = 100;
