//! Error types for the retry framework
//!
//! Operation failures are never wrapped: they belong to the caller's own
//! error type and reach the caller exactly as the operation produced them.
//! The framework introduces a single runtime kind, [`InterruptedSleep`],
//! which flows into the caller's error type through `From`.
//!
//! ```
//! use steadfast_retry::InterruptedSleep;
//!
//! #[derive(Debug)]
//! enum FetchError {
//!     Remote(String),
//!     Cancelled(InterruptedSleep),
//! }
//!
//! impl From<InterruptedSleep> for FetchError {
//!     fn from(err: InterruptedSleep) -> Self {
//!         Self::Cancelled(err)
//!     }
//! }
//! ```

use std::io;
use std::time::Duration;

use thiserror::Error;

/// The backoff wait before a retry was interrupted.
///
/// Always fatal to the current call: it is surfaced immediately, replaces
/// the pending operation failure and is never itself retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("backoff sleep of {delay:?} interrupted before retry")]
pub struct InterruptedSleep {
    delay: Duration,
}

impl InterruptedSleep {
    /// Create an interruption for a wait of `delay`
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The full delay that was being waited out when the interrupt arrived
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl From<InterruptedSleep> for io::Error {
    fn from(err: InterruptedSleep) -> Self {
        io::Error::new(io::ErrorKind::Interrupted, err)
    }
}

/// Convenience error for callers without an error type of their own.
///
/// Operations map their failures into [`RetryError::Operation`]; the
/// service converts interruptions into [`RetryError::Interrupted`].
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The operation's own failure from its last attempt
    #[error(transparent)]
    Operation(E),

    /// The backoff wait was interrupted
    #[error(transparent)]
    Interrupted(#[from] InterruptedSleep),
}

impl<E> RetryError<E> {
    /// Returns true if the call was cut short by an interrupt
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted(_))
    }

    /// The operation failure, if that is what ended the call
    pub fn into_operation(self) -> Option<E> {
        match self {
            Self::Operation(err) => Some(err),
            Self::Interrupted(_) => None,
        }
    }
}

/// Errors raised while building retry configuration.
///
/// These only ever occur at build or load time, never while a call runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting is out of range
    #[error("invalid retry configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    /// A settings document or value could not be parsed
    #[error("failed to parse retry configuration: {0}")]
    Parse(String),

    /// A settings file could not be read
    #[error("failed to read retry configuration: {0}")]
    Io(#[from] io::Error),
}

impl ConfigError {
    /// Create an out-of-range error for `field`
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { field, reason: reason.into() }
    }
}

/// Result type for configuration building
pub type ConfigResult<T> = Result<T, ConfigError>;
