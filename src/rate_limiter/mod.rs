//! Per-client fixed-window rate limiting.
//!
//! This module implements the limiter that guards every book route:
//! - Counts requests per (route group, client IP) key
//! - Allows at most `limit` requests per key per fixed window (default 30/60s)
//! - Resets a key's count once its window has elapsed
//! - Optionally sweeps expired counters in the background
//!
//! The window boundary is a hard cliff: a full quota at the end of one window
//! may be followed immediately by a full quota in the next.

mod counter;
mod decision;
mod key;
mod limiter;
mod middleware;

pub use counter::CounterState;
pub use decision::{ceil_secs, Decision};
pub use key::{RateLimitKey, RouteGroup};
pub use limiter::FixedWindowLimiter;
pub use middleware::{enforce_rate_limit, RateLimitGuard};
