// ABOUTME: Fixed call budget for capping tool use within one request.
// ABOUTME: Counts granted calls up to a limit; reset starts a new request cycle.

use std::sync::atomic::{AtomicUsize, Ordering};

/// A per-request cap on how many times an expensive call may be made.
///
/// Unlike a token bucket the budget never refills on its own: once `limit`
/// calls have been granted every further attempt is refused until
/// [`CallBudget::reset`] is called at the start of the next request.
#[derive(Debug)]
pub struct CallBudget {
    used: AtomicUsize,
    limit: usize,
}

impl CallBudget {
    /// Create a budget allowing `limit` calls per cycle.
    pub fn new(limit: usize) -> Self {
        Self {
            used: AtomicUsize::new(0),
            limit,
        }
    }

    /// Claim one call from the budget.
    ///
    /// Returns `false` without changing the count once the budget is spent.
    pub fn try_acquire(&self) -> bool {
        self.used
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                (used < self.limit).then_some(used + 1)
            })
            .is_ok()
    }

    /// Calls granted so far in this cycle.
    pub fn used(&self) -> usize {
        self.used.load(Ordering::Acquire)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Calls still available in this cycle.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.used())
    }

    /// Start a new cycle with the full budget.
    pub fn reset(&self) {
        self.used.store(0, Ordering::Release);
    }
}
