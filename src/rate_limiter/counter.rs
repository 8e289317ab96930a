//! Fixed-window counter for a single key.

use std::time::Duration;
use tokio::time::Instant;

use super::decision::Decision;

/// Lifecycle of a counter within its current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    /// Window just opened, nothing admitted yet.
    Fresh,
    /// Some, but not all, of the quota used.
    Active,
    /// Quota used up; requests are denied until the window rolls over.
    Saturated,
}

/// Requests admitted for one key since `window_start`.
///
/// Not synchronised on its own: callers hold the owning map's entry lock
/// for the whole of [`WindowCounter::admit`].
#[derive(Debug, Clone)]
pub(crate) struct WindowCounter {
    window_start: Instant,
    count: u32,
}

impl WindowCounter {
    pub(crate) fn new(now: Instant) -> Self {
        WindowCounter {
            window_start: now,
            count: 0,
        }
    }

    /// Whether the window opened at `window_start` has fully elapsed.
    pub(crate) fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) >= window
    }

    /// Starts a new window at `now` if the current one has elapsed.
    fn roll_over(&mut self, now: Instant, window: Duration) {
        if self.is_expired(now, window) {
            self.count = 0;
            self.window_start = now;
        }
    }

    /// Time left in the current window.
    fn time_left(&self, now: Instant, window: Duration) -> Duration {
        window.saturating_sub(now.saturating_duration_since(self.window_start))
    }

    /// Consumes one unit of quota if any is left.
    pub(crate) fn admit(&mut self, now: Instant, limit: u32, window: Duration) -> Decision {
        self.roll_over(now, window);
        let time_left = self.time_left(now, window);

        if self.count >= limit {
            return Decision::denied(limit, time_left);
        }

        self.count += 1;
        Decision::allowed(limit, limit - self.count, time_left)
    }

    /// Admitted count as of `now`, treating an elapsed window as empty.
    pub(crate) fn count_at(&self, now: Instant, window: Duration) -> u32 {
        if self.is_expired(now, window) {
            0
        } else {
            self.count
        }
    }

    pub(crate) fn state(&self, now: Instant, limit: u32, window: Duration) -> CounterState {
        match self.count_at(now, window) {
            0 => CounterState::Fresh,
            n if n >= limit => CounterState::Saturated,
            _ => CounterState::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn test_new_counter_is_fresh() {
        let now = Instant::now();
        let counter = WindowCounter::new(now);
        assert_eq!(counter.state(now, 3, WINDOW), CounterState::Fresh);
        assert_eq!(counter.count_at(now, WINDOW), 0);
    }

    #[test]
    fn test_admit_until_saturated() {
        let now = Instant::now();
        let mut counter = WindowCounter::new(now);

        let first = counter.admit(now, 3, WINDOW);
        assert!(first.allowed);
        assert_eq!(first.remaining, 2);
        assert_eq!(counter.state(now, 3, WINDOW), CounterState::Active);

        assert!(counter.admit(now, 3, WINDOW).allowed);
        let third = counter.admit(now, 3, WINDOW);
        assert!(third.allowed);
        assert_eq!(third.remaining, 0);
        assert_eq!(counter.state(now, 3, WINDOW), CounterState::Saturated);

        let fourth = counter.admit(now, 3, WINDOW);
        assert!(!fourth.allowed);
        assert_eq!(fourth.remaining, 0);
        // Denials do not consume quota
        assert_eq!(counter.count_at(now, WINDOW), 3);
    }

    #[test]
    fn test_denied_retry_after_is_time_left_in_window() {
        let start = Instant::now();
        let mut counter = WindowCounter::new(start);
        counter.admit(start, 1, WINDOW);

        let later = start + Duration::from_secs(45);
        let denied = counter.admit(later, 1, WINDOW);
        assert!(!denied.allowed);
        assert_eq!(denied.retry_after, Duration::from_secs(15));
    }

    #[test]
    fn test_window_rollover_resets_count() {
        let start = Instant::now();
        let mut counter = WindowCounter::new(start);
        counter.admit(start, 1, WINDOW);
        assert!(!counter.admit(start, 1, WINDOW).allowed);

        let next_window = start + WINDOW;
        assert_eq!(counter.state(next_window, 1, WINDOW), CounterState::Fresh);
        let decision = counter.admit(next_window, 1, WINDOW);
        assert!(decision.allowed);
        assert_eq!(decision.retry_after, WINDOW);
    }

    #[test]
    fn test_just_before_boundary_still_counts() {
        let start = Instant::now();
        let mut counter = WindowCounter::new(start);
        counter.admit(start, 1, WINDOW);

        let almost = start + WINDOW - Duration::from_millis(1);
        assert!(!counter.is_expired(almost, WINDOW));
        assert!(!counter.admit(almost, 1, WINDOW).allowed);
    }

    #[test]
    fn test_instant_before_window_start_does_not_panic() {
        let start = Instant::now();
        let mut counter = WindowCounter::new(start + Duration::from_secs(5));
        let decision = counter.admit(start, 2, WINDOW);
        assert!(decision.allowed);
        assert_eq!(decision.retry_after, WINDOW);
    }
}
