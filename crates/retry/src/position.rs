//! Position matching over bounded sequences
//!
//! A [`PositionMatcher`] classifies a zero-based index within a sequence of
//! known length. Callers use it to decide cheaply whether an attempt is
//! interesting enough to log, so the retry engine itself never needs a
//! logging dependency.
//!
//! ```
//! use steadfast_retry::PositionMatcher;
//!
//! let matcher = PositionMatcher::FirstAndLastOnly;
//! let logged: Vec<usize> = (0..4).filter(|&i| matcher.is_match(i, 4)).collect();
//! assert_eq!(logged, vec![0, 3]);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Rule selecting positions within a sequence of `size` elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum PositionMatcher {
    /// Only the first position
    FirstOnly,
    /// Only the last position
    LastOnly,
    /// The first and the last positions
    FirstAndLastOnly,
    /// Every position
    All,
}

impl PositionMatcher {
    /// Every matcher, in declaration order
    pub const ALL_VARIANTS: [Self; 4] =
        [Self::FirstOnly, Self::LastOnly, Self::FirstAndLastOnly, Self::All];

    /// Returns true if `index` is selected within a sequence of `size`.
    ///
    /// Expects `index < size`; other inputs give an unspecified answer but
    /// never panic. With `size == 1` the first and last positions coincide,
    /// so every matcher selects index 0.
    #[must_use]
    pub const fn is_match(self, index: usize, size: usize) -> bool {
        match self {
            Self::FirstOnly => index == 0,
            Self::LastOnly => index == size.saturating_sub(1),
            Self::FirstAndLastOnly => index == 0 || index == size.saturating_sub(1),
            Self::All => true,
        }
    }

    /// Stable lowercase name used in configuration
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstOnly => "first_only",
            Self::LastOnly => "last_only",
            Self::FirstAndLastOnly => "first_and_last_only",
            Self::All => "all",
        }
    }
}

impl fmt::Display for PositionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionMatcher {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL_VARIANTS.into_iter().find(|m| m.as_str() == normalized).ok_or_else(|| {
            ConfigError::Parse(format!(
                "unknown position matcher '{s}', expected one of: first_only, last_only, \
                 first_and_last_only, all"
            ))
        })
    }
}
