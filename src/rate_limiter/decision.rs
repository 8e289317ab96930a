//! Result of a single rate-limit check.

use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue};

use crate::config::{
    HEADER_RATE_LIMIT_LIMIT, HEADER_RATE_LIMIT_REMAINING, HEADER_RATE_LIMIT_RESET,
    HEADER_RETRY_AFTER,
};

/// Outcome of [`FixedWindowLimiter::check`](super::FixedWindowLimiter::check).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Whether the request may proceed.
    pub allowed: bool,
    /// Configured requests per window (0 when limiting is disabled).
    pub limit: u32,
    /// Requests left in the current window after this one.
    pub remaining: u32,
    /// Time until the current window rolls over. A denied client may retry
    /// after this much time.
    pub retry_after: Duration,
}

impl Decision {
    pub(crate) fn allowed(limit: u32, remaining: u32, retry_after: Duration) -> Self {
        Self {
            allowed: true,
            limit,
            remaining,
            retry_after,
        }
    }

    pub(crate) fn denied(limit: u32, retry_after: Duration) -> Self {
        Self {
            allowed: false,
            limit,
            remaining: 0,
            retry_after,
        }
    }

    /// Decision returned when limiting is switched off.
    pub(crate) fn unlimited() -> Self {
        Self::allowed(0, 0, Duration::ZERO)
    }

    /// `retry_after` in whole seconds, rounded up and never below one.
    pub fn retry_after_secs(&self) -> u64 {
        ceil_secs(self.retry_after)
    }

    /// Writes the `X-RateLimit-*` headers, plus `Retry-After` when denied.
    pub fn apply_headers(&self, headers: &mut HeaderMap) {
        let reset = HeaderValue::from(self.retry_after_secs());
        headers.insert(HEADER_RATE_LIMIT_LIMIT, HeaderValue::from(self.limit));
        headers.insert(HEADER_RATE_LIMIT_REMAINING, HeaderValue::from(self.remaining));
        headers.insert(HEADER_RATE_LIMIT_RESET, reset.clone());
        if !self.allowed {
            headers.insert(HEADER_RETRY_AFTER, reset);
        }
    }
}

/// Whole seconds for `Retry-After`: rounded up, at least one.
pub fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    let rounded = if duration.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    };
    rounded.max(1)
}
