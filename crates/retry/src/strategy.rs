// Per-call retry budget with a fixed backoff delay
use std::fmt;
use std::time::Duration;

use crate::error::InterruptedSleep;
use crate::sleep::{Sleeper, ThreadSleeper};

/// State of a [`RetryStrategy`]'s budget.
///
/// Budgets only ever move from `HasBudget` towards `Exhausted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetState {
    /// At least one retry remains
    HasBudget,
    /// No retries remain; the next failure is final
    Exhausted,
}

/// Retry budget for a single logical call.
///
/// Created by a [`RetryStrategyFactory`](crate::RetryStrategyFactory) at the
/// start of a call and dropped when the call completes. It is deliberately
/// neither `Clone` nor shared: one strategy, one call.
pub struct RetryStrategy<S: Sleeper = ThreadSleeper> {
    remaining_retries: u32,
    delay: Duration,
    sleeper: S,
}

impl RetryStrategy<ThreadSleeper> {
    /// Create a strategy that sleeps on the calling thread
    pub fn new(max_retry_count: u32, delay: Duration) -> Self {
        Self::with_sleeper(max_retry_count, delay, ThreadSleeper)
    }
}

impl<S: Sleeper> RetryStrategy<S> {
    /// Create a strategy with a custom sleeper (for testing)
    pub fn with_sleeper(max_retry_count: u32, delay: Duration, sleeper: S) -> Self {
        Self { remaining_retries: max_retry_count, delay, sleeper }
    }

    /// Returns true if another retry is allowed. Never changes state.
    #[must_use]
    pub fn can_retry(&self) -> bool {
        self.remaining_retries > 0
    }

    /// Consume one retry, then block for the configured delay.
    ///
    /// The retry is consumed even when the wait is interrupted; an
    /// interrupted strategy must not be used again. On an exhausted budget
    /// the count stays at zero.
    ///
    /// # Errors
    /// Returns [`InterruptedSleep`] if the wait is interrupted.
    pub fn before_retry(&mut self) -> Result<(), InterruptedSleep> {
        self.remaining_retries = self.remaining_retries.saturating_sub(1);
        self.sleeper.sleep(self.delay)
    }

    /// Current budget state
    pub fn state(&self) -> BudgetState {
        if self.can_retry() {
            BudgetState::HasBudget
        } else {
            BudgetState::Exhausted
        }
    }

    /// Retries left in the budget
    pub fn remaining_retries(&self) -> u32 {
        self.remaining_retries
    }

    /// Delay applied before every retry
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<S: Sleeper> fmt::Debug for RetryStrategy<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryStrategy")
            .field("remaining_retries", &self.remaining_retries)
            .field("delay", &self.delay)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
