//! Fixed-window rate limiter implementation.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::counter::{CounterState, WindowCounter};
use super::decision::Decision;
use super::key::RateLimitKey;

/// Per-key fixed-window rate limiter.
///
/// Each key gets `limit` requests per `window`. Counters are created on the
/// first request from a key and reset once their window has elapsed, so a
/// client can spend a full quota at the end of one window and another full
/// quota right after the boundary.
///
/// Cloning is cheap; clones share the same counters.
///
/// # Thread Safety
///
/// The roll-over check, the limit check and the increment for a key all run
/// while holding that key's `DashMap` shard lock, so concurrent checks can
/// never admit more than `limit` requests per window. Unrelated keys on other
/// shards do not contend.
#[derive(Clone)]
pub struct FixedWindowLimiter {
    inner: Arc<LimiterInner>,
}

struct LimiterInner {
    limit: u32,
    window: Duration,
    counters: DashMap<RateLimitKey, WindowCounter>,
}

impl FixedWindowLimiter {
    /// Creates a limiter admitting `limit` requests per key per `window`.
    ///
    /// A `limit` of 0 disables limiting: every check is allowed and no
    /// counters are kept.
    pub fn new(limit: u32, window: Duration) -> Self {
        FixedWindowLimiter {
            inner: Arc::new(LimiterInner {
                limit,
                window,
                counters: DashMap::new(),
            }),
        }
    }

    /// False when constructed with a zero limit.
    pub fn is_enabled(&self) -> bool {
        self.inner.limit > 0
    }

    /// Requests admitted per key per window.
    pub fn limit(&self) -> u32 {
        self.inner.limit
    }

    /// Length of each fixed window.
    pub fn window(&self) -> Duration {
        self.inner.window
    }

    /// Checks and, if allowed, records one request for `key`.
    pub fn check(&self, key: RateLimitKey) -> Decision {
        self.check_at(key, Instant::now())
    }

    /// [`check`](Self::check) against an explicit clock reading.
    pub fn check_at(&self, key: RateLimitKey, now: Instant) -> Decision {
        if !self.is_enabled() {
            return Decision::unlimited();
        }

        let mut counter = self
            .inner
            .counters
            .entry(key)
            .or_insert_with(|| WindowCounter::new(now));
        counter.admit(now, self.inner.limit, self.inner.window)
    }

    /// Requests admitted for `key` in its current window, without consuming quota.
    pub fn usage(&self, key: &RateLimitKey) -> u32 {
        self.usage_at(key, Instant::now())
    }

    /// [`usage`](Self::usage) against an explicit clock reading.
    pub fn usage_at(&self, key: &RateLimitKey, now: Instant) -> u32 {
        self.inner
            .counters
            .get(key)
            .map(|counter| counter.count_at(now, self.inner.window))
            .unwrap_or(0)
    }

    /// State of `key`'s counter; an untracked key is [`CounterState::Fresh`].
    pub fn state_at(&self, key: &RateLimitKey, now: Instant) -> CounterState {
        self.inner
            .counters
            .get(key)
            .map(|counter| counter.state(now, self.inner.limit, self.inner.window))
            .unwrap_or(CounterState::Fresh)
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.inner.counters.len()
    }

    /// True when no key is tracked.
    pub fn is_empty(&self) -> bool {
        self.inner.counters.is_empty()
    }

    /// Drops counters whose window has elapsed and returns how many were removed.
    ///
    /// An expired counter would be reset on its next check anyway, so removing
    /// it is not observable by clients.
    pub fn evict_expired(&self) -> usize {
        self.evict_expired_at(Instant::now())
    }

    /// [`evict_expired`](Self::evict_expired) against an explicit clock reading.
    pub fn evict_expired_at(&self, now: Instant) -> usize {
        let window = self.inner.window;
        let mut removed = 0;
        self.inner.counters.retain(|_, counter| {
            let keep = !counter.is_expired(now, window);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Starts a background task that calls [`evict_expired`](Self::evict_expired)
    /// every `every`.
    ///
    /// Returns the token that stops the task. Must be called from within a
    /// Tokio runtime.
    pub fn start_eviction(&self, every: Duration) -> CancellationToken {
        let limiter = self.clone();
        let shutdown = CancellationToken::new();
        let stop = shutdown.clone();

        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = limiter.evict_expired();
                        if removed > 0 {
                            log::debug!(
                                "Evicted {} expired rate-limit counter{} ({} still tracked)",
                                removed,
                                if removed == 1 { "" } else { "s" },
                                limiter.len()
                            );
                        }
                    }
                    _ = stop.cancelled() => {
                        log::debug!("Rate-limit eviction task shutting down");
                        break;
                    }
                }
            }
        });

        shutdown
    }
}
