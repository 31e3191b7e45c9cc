//! Bounded, fixed-delay retry execution.
//!
//! [`RetryService`] re-runs a fallible operation until it succeeds or the
//! retry budget handed out by a [`RetryStrategyFactory`] runs dry. Every call
//! gets a fresh [`RetryStrategy`]; nothing is shared between calls except the
//! immutable factory configuration.
//!
//! The only suspension point is the backoff wait, which blocks the calling
//! thread and can be cut short through the thread's [`InterruptHandle`].
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `observability`: [`AttemptLogger`] for position-gated attempt logging
//! - `config`: [`RetrySettings`] loaded from TOML/JSON files or the
//!   environment
//! - `test-utils`: [`testing::MockSleeper`] for deterministic tests
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use steadfast_retry::{RetryService, RetryStrategyFactory};
//!
//! let factory = RetryStrategyFactory::builder()
//!     .max_retry_count(2)
//!     .delay(Duration::from_millis(1))
//!     .build();
//!
//! let mut calls = 0;
//! let value = RetryService::new().call(&factory, || {
//!     calls += 1;
//!     if calls < 2 {
//!         Err(std::io::Error::other("flaky"))
//!     } else {
//!         Ok(calls)
//!     }
//! });
//!
//! assert_eq!(value.ok(), Some(2));
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod constants;
pub mod error;
pub mod factory;
pub mod interrupt;
pub mod position;
pub mod service;
pub mod sleep;
pub mod strategy;

// Optional tiers
// ---------------------------------------------------------------------
#[cfg(feature = "config")]
pub mod config;
#[cfg(feature = "observability")]
pub mod observability;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "config")]
pub use config::RetrySettings;
pub use error::{ConfigError, InterruptedSleep, RetryError};
pub use factory::{RetryStrategyFactory, RetryStrategyFactoryBuilder};
pub use interrupt::InterruptHandle;
#[cfg(feature = "observability")]
pub use observability::AttemptLogger;
pub use position::PositionMatcher;
pub use service::RetryService;
pub use sleep::{Sleeper, ThreadSleeper};
pub use strategy::{BudgetState, RetryStrategy};
