//! HTTP header name constants.
//!
//! Headers attached to every rate-limited response so clients can pace
//! themselves without hitting a 429.

/// Requests allowed per window
pub const HEADER_RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
/// Requests left in the current window
pub const HEADER_RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
/// Seconds until the current window closes
pub const HEADER_RATE_LIMIT_RESET: &str = "x-ratelimit-reset";
/// Seconds a rejected client should wait (only set on 429)
pub const HEADER_RETRY_AFTER: &str = "retry-after";
