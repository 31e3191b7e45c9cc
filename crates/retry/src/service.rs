//! Retry orchestration
//!
//! [`RetryService`] drives the attempt loop for one call:
//!
//! ```text
//! attempt ──ok──▶ return value
//!    │
//!   err
//!    ▼
//! budget? ──exhausted──▶ return the operation's error, unchanged
//!    │
//! has budget
//!    ▼
//! before_retry ──interrupted──▶ return the interruption, drop the error
//!    │
//!    └──────▶ attempt again
//! ```
//!
//! A budget of `N` retries allows exactly `N + 1` attempts. The service logs
//! nothing and keeps no state between calls; wrap the operation in an
//! `AttemptLogger` (feature `observability`) to record progress.

use crate::error::InterruptedSleep;
use crate::factory::RetryStrategyFactory;
use crate::sleep::Sleeper;
use crate::strategy::{BudgetState, RetryStrategy};

/// What the loop does after a failed attempt
#[derive(Debug)]
pub(crate) enum FailureDecision<E> {
    /// The backoff completed; attempt again
    Retry,
    /// The budget is spent; the operation's error is final
    Propagate(E),
    /// The backoff was interrupted; the call is aborted
    Abort(InterruptedSleep),
}

/// Decide how to continue after `error`, consuming a retry if one remains
pub(crate) fn on_failure<S: Sleeper, E>(
    strategy: &mut RetryStrategy<S>,
    error: E,
) -> FailureDecision<E> {
    match strategy.state() {
        BudgetState::Exhausted => FailureDecision::Propagate(error),
        BudgetState::HasBudget => match strategy.before_retry() {
            Ok(()) => FailureDecision::Retry,
            Err(interrupted) => FailureDecision::Abort(interrupted),
        },
    }
}

/// Runs operations under a fresh retry budget per call
///
/// Stateless: one instance can serve any number of concurrent callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryService;

impl RetryService {
    /// Create a retry service
    pub fn new() -> Self {
        Self
    }

    /// Run an operation that produces no value.
    ///
    /// # Errors
    /// Returns the operation's last error once the budget is exhausted, or
    /// the converted [`InterruptedSleep`] if a backoff wait is interrupted.
    pub fn run<S, F, E>(&self, factory: &RetryStrategyFactory<S>, operation: F) -> Result<(), E>
    where
        S: Sleeper + Clone,
        F: FnMut() -> Result<(), E>,
        E: From<InterruptedSleep>,
    {
        self.call(factory, operation)
    }

    /// Run an operation and return the value of its first successful
    /// attempt.
    ///
    /// # Errors
    /// Returns the operation's last error once the budget is exhausted, or
    /// the converted [`InterruptedSleep`] if a backoff wait is interrupted.
    pub fn call<S, F, T, E>(
        &self,
        factory: &RetryStrategyFactory<S>,
        mut operation: F,
    ) -> Result<T, E>
    where
        S: Sleeper + Clone,
        F: FnMut() -> Result<T, E>,
        E: From<InterruptedSleep>,
    {
        let mut strategy = factory.new_instance();

        loop {
            let error = match operation() {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            match on_failure(&mut strategy, error) {
                FailureDecision::Retry => continue,
                FailureDecision::Propagate(error) => return Err(error),
                FailureDecision::Abort(interrupted) => return Err(E::from(interrupted)),
            }
        }
    }
}
