//! Testing utilities
//!
//! Provides [`MockSleeper`], a [`Sleeper`] that records requested delays
//! instead of blocking, so retry loops run instantly and deterministically.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use steadfast_retry::testing::MockSleeper;
//! use steadfast_retry::Sleeper;
//!
//! let sleeper = MockSleeper::new().interrupt_on(2);
//!
//! assert!(sleeper.sleep(Duration::from_secs(5)).is_ok());
//! assert!(sleeper.sleep(Duration::from_secs(5)).is_err());
//! assert_eq!(sleeper.sleep_count(), 2);
//! ```

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::InterruptedSleep;
use crate::sleep::Sleeper;

#[derive(Debug, Default)]
struct MockSleeperState {
    recorded: Vec<Duration>,
    interrupt_on: Option<usize>,
}

/// Recording sleeper for deterministic testing
///
/// Clones share their recordings, so a test can keep one clone and hand
/// another to a factory.
#[derive(Debug, Clone, Default)]
pub struct MockSleeper {
    state: Arc<Mutex<MockSleeperState>>,
}

impl MockSleeper {
    /// Create a sleeper that never interrupts
    pub fn new() -> Self {
        Self::default()
    }

    /// Interrupt the `nth` wait (1-based) instead of completing it
    #[must_use]
    pub fn interrupt_on(self, nth: usize) -> Self {
        self.state.lock().interrupt_on = Some(nth);
        self
    }

    /// Number of waits requested so far, interrupted ones included
    pub fn sleep_count(&self) -> usize {
        self.state.lock().recorded.len()
    }

    /// Every requested delay, in order
    pub fn recorded(&self) -> Vec<Duration> {
        self.state.lock().recorded.clone()
    }

    /// Sum of all requested delays
    pub fn total_slept(&self) -> Duration {
        self.state.lock().recorded.iter().sum()
    }
}

impl Sleeper for MockSleeper {
    fn sleep(&self, delay: Duration) -> Result<(), InterruptedSleep> {
        let mut state = self.state.lock();
        state.recorded.push(delay);

        if state.interrupt_on == Some(state.recorded.len()) {
            Err(InterruptedSleep::new(delay))
        } else {
            Ok(())
        }
    }
}
