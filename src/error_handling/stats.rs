//! Request outcome statistics.
//!
//! Thread-safe counters of how requests ended, reported when the server
//! shuts down.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::RequestOutcome;

/// Thread-safe request outcome tracker.
///
/// One atomic counter per [`RequestOutcome`], all created up front so the
/// map is never written after construction and can be shared through `Arc`
/// without a lock.
pub struct RequestStats {
    outcomes: HashMap<RequestOutcome, AtomicUsize>,
}

impl RequestStats {
    /// Creates the stats with every outcome at zero.
    pub fn new() -> Self {
        let mut outcomes = HashMap::new();
        for outcome in RequestOutcome::iter() {
            outcomes.insert(outcome, AtomicUsize::new(0));
        }

        RequestStats { outcomes }
    }

    /// Increment the counter for an outcome.
    pub fn record(&self, outcome: RequestOutcome) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to record outcome {:?} which is not in the map. \
                 This indicates a bug in RequestStats initialization.",
                outcome
            );
        }
    }

    /// Get the count for an outcome.
    pub fn count(&self, outcome: RequestOutcome) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total number of finished requests.
    pub fn total(&self) -> usize {
        RequestOutcome::iter().map(|o| self.count(o)).sum()
    }

    /// Logs a one-line-per-outcome summary, skipping empty buckets.
    pub fn log_summary(&self) {
        let total = self.total();
        if total == 0 {
            log::info!("No requests served");
            return;
        }

        log::info!("Served {} request{}", total, if total == 1 { "" } else { "s" });
        for outcome in RequestOutcome::iter() {
            let count = self.count(outcome);
            if count > 0 {
                log::info!("   {}: {}", outcome, count);
            }
        }
    }
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}
