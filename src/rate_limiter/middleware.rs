//! Axum middleware that gates a route group behind the limiter.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::key::{RateLimitKey, RouteGroup};
use super::limiter::FixedWindowLimiter;
use crate::error_handling::ApiError;

/// State for [`enforce_rate_limit`]: the shared limiter and the group the
/// wrapped routes count against.
#[derive(Clone)]
pub struct RateLimitGuard {
    limiter: FixedWindowLimiter,
    group: RouteGroup,
}

impl RateLimitGuard {
    /// Guard counting against `group` on `limiter`.
    pub fn new(limiter: FixedWindowLimiter, group: RouteGroup) -> Self {
        Self { limiter, group }
    }
}

/// Checks the client's quota before the handler runs.
///
/// Denied requests get `429 {"error": "Too Many Requests"}` with a
/// `Retry-After` header and never reach the handler. Allowed responses carry
/// the `X-RateLimit-*` headers.
pub async fn enforce_rate_limit(
    State(guard): State<RateLimitGuard>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let key = RateLimitKey::new(guard.group, peer.ip());
    let decision = guard.limiter.check(key);

    if !decision.allowed {
        log::warn!(
            "Rate limit exceeded for {} on {} {} (retry in {}s)",
            key,
            request.method(),
            request.uri().path(),
            decision.retry_after_secs()
        );
        let mut response = ApiError::TooManyRequests {
            retry_after: decision.retry_after,
        }
        .into_response();
        decision.apply_headers(response.headers_mut());
        return response;
    }

    log::debug!(
        "Admitted {} {} for {} ({} left)",
        request.method(),
        request.uri().path(),
        key,
        decision.remaining
    );

    let mut response = next.run(request).await;
    if guard.limiter.is_enabled() {
        decision.apply_headers(response.headers_mut());
    }
    response
}
