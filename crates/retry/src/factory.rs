//! Immutable retry configuration that hands out per-call strategies
//!
//! A [`RetryStrategyFactory`] is built once and shared freely; every call to
//! [`RetryStrategyFactory::new_instance`] returns a brand new
//! [`RetryStrategy`] with a full budget. Factories never cache or pool
//! strategies.

use std::time::Duration;

use crate::constants::{DEFAULT_DELAY, DEFAULT_MAX_RETRY_COUNT};
use crate::error::{ConfigError, ConfigResult};
use crate::sleep::{Sleeper, ThreadSleeper};
use crate::strategy::RetryStrategy;

/// Budget size and delay shared by every call that uses this factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryStrategyFactory<S = ThreadSleeper> {
    max_retry_count: u32,
    delay: Duration,
    sleeper: S,
}

impl RetryStrategyFactory<ThreadSleeper> {
    /// Create a factory builder with default settings
    pub fn builder() -> RetryStrategyFactoryBuilder {
        RetryStrategyFactoryBuilder::new()
    }

    /// Build a factory from untyped settings, such as values read from a
    /// configuration source.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidConfiguration`] if either value is
    /// negative or the retry count does not fit in a `u32`.
    pub fn try_from_raw(max_retry_count: i64, delay_ms: i64) -> ConfigResult<Self> {
        if max_retry_count < 0 {
            return Err(ConfigError::invalid(
                "max_retry_count",
                format!("must be >= 0, got {max_retry_count}"),
            ));
        }
        let max_retry_count = u32::try_from(max_retry_count).map_err(|_| {
            ConfigError::invalid(
                "max_retry_count",
                format!("must be <= {}, got {max_retry_count}", u32::MAX),
            )
        })?;

        let delay_ms = u64::try_from(delay_ms).map_err(|_| {
            ConfigError::invalid("delay_ms", format!("must be >= 0, got {delay_ms}"))
        })?;

        Ok(Self::builder()
            .max_retry_count(max_retry_count)
            .delay(Duration::from_millis(delay_ms))
            .build())
    }
}

impl<S: Sleeper + Clone> RetryStrategyFactory<S> {
    /// Create a fresh strategy with a full budget
    #[must_use]
    pub fn new_instance(&self) -> RetryStrategy<S> {
        RetryStrategy::with_sleeper(self.max_retry_count, self.delay, self.sleeper.clone())
    }
}

impl<S> RetryStrategyFactory<S> {
    /// Replace the sleeper handed to new strategies (for testing)
    pub fn with_sleeper<T: Sleeper + Clone>(self, sleeper: T) -> RetryStrategyFactory<T> {
        RetryStrategyFactory { max_retry_count: self.max_retry_count, delay: self.delay, sleeper }
    }

    /// Number of retries each call may make
    pub fn max_retry_count(&self) -> u32 {
        self.max_retry_count
    }

    /// Total attempts each call may make: the first attempt plus every retry
    pub fn max_attempts(&self) -> u64 {
        u64::from(self.max_retry_count) + 1
    }

    /// Delay applied before every retry
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryStrategyFactory<ThreadSleeper> {
    fn default() -> Self {
        RetryStrategyFactoryBuilder::new().build()
    }
}

/// Builder for [`RetryStrategyFactory`] with fluent API
///
/// The typed setters make negative counts and delays unrepresentable, so
/// `build` cannot fail; [`RetryStrategyFactory::try_from_raw`] validates
/// untyped input.
#[derive(Debug, Clone)]
pub struct RetryStrategyFactoryBuilder {
    max_retry_count: u32,
    delay: Duration,
}

impl Default for RetryStrategyFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryStrategyFactoryBuilder {
    /// Start from the default retry count and delay
    pub fn new() -> Self {
        Self { max_retry_count: DEFAULT_MAX_RETRY_COUNT, delay: DEFAULT_DELAY }
    }

    /// Number of retries after the first attempt; 0 means attempt once
    pub fn max_retry_count(mut self, count: u32) -> Self {
        self.max_retry_count = count;
        self
    }

    /// Fixed delay before every retry
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Finish the factory
    pub fn build(self) -> RetryStrategyFactory<ThreadSleeper> {
        RetryStrategyFactory {
            max_retry_count: self.max_retry_count,
            delay: self.delay,
            sleeper: ThreadSleeper,
        }
    }
}
