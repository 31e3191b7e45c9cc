//! Per-thread interruption signal
//!
//! Every thread lazily owns one interrupt flag. The thread that will block in
//! a backoff wait hands out an [`InterruptHandle`] (via [`current`]); any
//! other thread can then raise the flag with [`InterruptHandle::interrupt`].
//! A wait in progress wakes immediately, and a flag raised before the wait
//! starts cuts the next wait short. Observing an interrupt clears the flag.
//!
//! ```
//! use std::time::Duration;
//!
//! use steadfast_retry::interrupt;
//!
//! let handle = interrupt::current();
//! handle.interrupt();
//!
//! assert!(interrupt::sleep(Duration::from_secs(60)).is_err());
//! assert!(!handle.is_interrupted());
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::InterruptedSleep;

thread_local! {
    static CURRENT: Arc<Signal> = Arc::new(Signal::default());
}

#[derive(Debug, Default)]
struct Signal {
    pending: Mutex<bool>,
    wake: Condvar,
}

/// Cross-thread handle to one thread's interrupt flag
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    signal: Arc<Signal>,
}

impl InterruptHandle {
    /// Handle for the calling thread
    pub fn current() -> Self {
        Self { signal: CURRENT.with(Arc::clone) }
    }

    /// Raise the flag and wake the owning thread if it is waiting
    pub fn interrupt(&self) {
        let mut pending = self.signal.pending.lock();
        *pending = true;
        self.signal.wake.notify_all();
    }

    /// Returns true if an interrupt is pending, without clearing it
    pub fn is_interrupted(&self) -> bool {
        *self.signal.pending.lock()
    }

    /// Returns true if both handles refer to the same thread's flag
    pub fn same_thread(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.signal, &other.signal)
    }
}

/// Handle for the calling thread
pub fn current() -> InterruptHandle {
    InterruptHandle::current()
}

/// Clear the calling thread's flag, returning whether it was raised
pub fn take() -> bool {
    CURRENT.with(|signal| std::mem::take(&mut *signal.pending.lock()))
}

/// Block the calling thread for `delay` unless it is interrupted first.
///
/// A pending interrupt fails the wait immediately, even for a zero delay.
/// Spurious wake-ups never shorten the wait.
pub fn sleep(delay: Duration) -> Result<(), InterruptedSleep> {
    let signal = CURRENT.with(Arc::clone);
    let mut pending = signal.pending.lock();

    if std::mem::take(&mut *pending) {
        return Err(InterruptedSleep::new(delay));
    }

    match Instant::now().checked_add(delay) {
        Some(deadline) => {
            while !*pending {
                if signal.wake.wait_until(&mut pending, deadline).timed_out() {
                    break;
                }
            }
        }
        // Deadline beyond the clock's range: only an interrupt ends the wait
        None => {
            while !*pending {
                signal.wake.wait(&mut pending);
            }
        }
    }

    if std::mem::take(&mut *pending) {
        Err(InterruptedSleep::new(delay))
    } else {
        Ok(())
    }
}
