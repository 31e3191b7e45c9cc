//! Backoff wait abstraction
//!
//! [`Sleeper`] is the seam between a [`RetryStrategy`](crate::RetryStrategy)
//! and the host thread. Production code uses [`ThreadSleeper`]; tests can
//! swap in [`MockSleeper`](crate::testing::MockSleeper) to skip real waits.

use std::time::Duration;

use crate::error::InterruptedSleep;
use crate::interrupt;

/// Blocks the calling thread between attempts
pub trait Sleeper: Send + Sync {
    /// Wait for `delay`, failing early if the wait is interrupted
    fn sleep(&self, delay: Duration) -> Result<(), InterruptedSleep>;
}

/// Real thread sleep that honours the thread's interrupt flag
///
/// See [`interrupt`] for how another thread cancels the wait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, delay: Duration) -> Result<(), InterruptedSleep> {
        interrupt::sleep(delay)
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, delay: Duration) -> Result<(), InterruptedSleep> {
        (**self).sleep(delay)
    }
}

impl<S: Sleeper + ?Sized> Sleeper for std::sync::Arc<S> {
    fn sleep(&self, delay: Duration) -> Result<(), InterruptedSleep> {
        (**self).sleep(delay)
    }
}
