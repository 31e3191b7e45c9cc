//! Position-gated attempt logging
//!
//! The retry service itself never logs. [`AttemptLogger`] wraps the
//! operation instead and emits `tracing` events only for the attempts its
//! [`PositionMatcher`] selects, so a noisy retry loop can report just its
//! first and last attempts.
//!
//! ```
//! use std::time::Duration;
//!
//! use steadfast_retry::{AttemptLogger, PositionMatcher, RetryService, RetryStrategyFactory};
//!
//! let factory = RetryStrategyFactory::builder()
//!     .max_retry_count(4)
//!     .delay(Duration::ZERO)
//!     .build();
//! let logger = AttemptLogger::for_factory("sync_inbox", PositionMatcher::LastOnly, &factory);
//!
//! let result = RetryService::new()
//!     .run(&factory, logger.wrap(|| Err(std::io::Error::other("offline"))));
//! assert!(result.is_err());
//! ```

use std::fmt::Display;

use tracing::{debug, warn};

use crate::factory::RetryStrategyFactory;
use crate::position::PositionMatcher;

/// Logs the attempts of one retried operation that a matcher selects
#[derive(Debug, Clone)]
pub struct AttemptLogger {
    operation_name: String,
    matcher: PositionMatcher,
    max_attempts: u64,
}

impl AttemptLogger {
    /// Create a logger for an operation that may run `max_attempts` times
    pub fn new(
        operation_name: impl Into<String>,
        matcher: PositionMatcher,
        max_attempts: u64,
    ) -> Self {
        Self { operation_name: operation_name.into(), matcher, max_attempts: max_attempts.max(1) }
    }

    /// Create a logger sized to the attempts `factory` allows
    pub fn for_factory<S>(
        operation_name: impl Into<String>,
        matcher: PositionMatcher,
        factory: &RetryStrategyFactory<S>,
    ) -> Self {
        Self::new(operation_name, matcher, factory.max_attempts())
    }

    /// Name reported with every event
    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    /// Attempts this logger expects per call
    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }

    /// Returns true if the zero-based attempt `index` should be logged
    pub fn should_log(&self, index: u64) -> bool {
        let size = usize::try_from(self.max_attempts).unwrap_or(usize::MAX);
        let index = usize::try_from(index).unwrap_or(usize::MAX).min(size - 1);
        self.matcher.is_match(index, size)
    }

    /// Record a failed attempt if its position is selected
    pub fn record_failure(&self, index: u64, error: &dyn Display) {
        if self.should_log(index) {
            warn!(
                operation = %self.operation_name,
                attempt = index + 1,
                max_attempts = self.max_attempts,
                error = %error,
                "Retry attempt failed"
            );
        }
    }

    /// Record a success that needed at least one retry, if its position is
    /// selected
    pub fn record_success(&self, index: u64) {
        if index > 0 && self.should_log(index) {
            debug!(
                operation = %self.operation_name,
                attempt = index + 1,
                max_attempts = self.max_attempts,
                "Retry attempt succeeded"
            );
        }
    }

    /// Wrap `operation` so each attempt is recorded.
    ///
    /// Every wrapped closure counts its own attempts, so wrap once per call.
    pub fn wrap<'a, F, T, E>(&'a self, mut operation: F) -> impl FnMut() -> Result<T, E> + 'a
    where
        F: FnMut() -> Result<T, E> + 'a,
        E: Display,
    {
        let mut index = 0u64;
        move || {
            let current = index;
            index += 1;
            let result = operation();
            match &result {
                Ok(_) => self.record_success(current),
                Err(error) => self.record_failure(current, error),
            }
            result
        }
    }
}
