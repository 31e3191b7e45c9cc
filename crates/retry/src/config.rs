//! Retry settings loader
//!
//! Loads [`RetrySettings`] from TOML or JSON documents, from files, or from
//! environment variables, and validates them into a
//! [`RetryStrategyFactory`].
//!
//! ## Environment Variables
//! - `STEADFAST_RETRY_MAX_RETRY_COUNT`: retries after the first attempt
//! - `STEADFAST_RETRY_DELAY_MS`: fixed delay before each retry
//! - `STEADFAST_RETRY_LOG_POSITIONS`: `first_only`, `last_only`,
//!   `first_and_last_only` or `all`
//!
//! Unset variables keep their defaults.
//!
//! ## File Formats
//! ```toml
//! max_retry_count = 2
//! delay_ms = 500
//! log_positions = "last_only"
//! ```
//! The format is chosen by file extension (`.toml` or `.json`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DELAY, DEFAULT_LOG_POSITIONS, DEFAULT_MAX_RETRY_COUNT, ENV_DELAY_MS,
    ENV_LOG_POSITIONS, ENV_MAX_RETRY_COUNT,
};
use crate::error::{ConfigError, ConfigResult};
use crate::factory::RetryStrategyFactory;
use crate::position::PositionMatcher;

/// Untyped retry settings as they appear in configuration sources
///
/// Counts and delays are signed so out-of-range values survive parsing and
/// are reported by [`RetrySettings::validate`] rather than as parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Retries after the first attempt
    pub max_retry_count: i64,
    /// Fixed delay before each retry, in milliseconds
    pub delay_ms: i64,
    /// Attempt positions worth logging
    pub log_positions: PositionMatcher,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retry_count: i64::from(DEFAULT_MAX_RETRY_COUNT),
            delay_ms: i64::try_from(DEFAULT_DELAY.as_millis()).unwrap_or(i64::MAX),
            log_positions: DEFAULT_LOG_POSITIONS,
        }
    }
}

impl RetrySettings {
    /// Parse settings from a TOML document
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if the document is not valid TOML or
    /// has fields of the wrong type.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(format!("invalid TOML format: {e}")))
    }

    /// Parse settings from a JSON document
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if the document is not valid JSON or
    /// has fields of the wrong type.
    pub fn from_json_str(contents: &str) -> ConfigResult<Self> {
        serde_json::from_str(contents)
            .map_err(|e| ConfigError::Parse(format!("invalid JSON format: {e}")))
    }

    /// Load settings from a `.toml` or `.json` file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its extension is unsupported or its
    /// contents are invalid.
    pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Loading retry settings from file");

        let contents = std::fs::read_to_string(path)?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

        match extension {
            "toml" => Self::from_toml_str(&contents),
            "json" => Self::from_json_str(&contents),
            other => Err(ConfigError::Parse(format!("unsupported config format: {other}"))),
        }
    }

    /// Load settings from the process environment
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if a variable is set but unparsable.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through a key lookup, starting from the defaults
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if a present value is unparsable.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup(ENV_MAX_RETRY_COUNT) {
            settings.max_retry_count = parse_int(ENV_MAX_RETRY_COUNT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_DELAY_MS) {
            settings.delay_ms = parse_int(ENV_DELAY_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG_POSITIONS) {
            settings.log_positions = raw.parse()?;
        }

        tracing::debug!(
            max_retry_count = settings.max_retry_count,
            delay_ms = settings.delay_ms,
            log_positions = %settings.log_positions,
            "Retry settings resolved from environment"
        );
        Ok(settings)
    }

    /// Check that counts and delays are in range
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidConfiguration`] naming the first
    /// offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        self.to_factory().map(|_| ())
    }

    /// Validate and build a factory
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidConfiguration`] for negative or
    /// oversized values.
    pub fn to_factory(&self) -> ConfigResult<RetryStrategyFactory> {
        RetryStrategyFactory::try_from_raw(self.max_retry_count, self.delay_ms)
    }
}

impl TryFrom<&RetrySettings> for RetryStrategyFactory {
    type Error = ConfigError;

    fn try_from(settings: &RetrySettings) -> ConfigResult<Self> {
        settings.to_factory()
    }
}

fn parse_int(key: &str, raw: &str) -> ConfigResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| ConfigError::Parse(format!("invalid value for {key}: {e}")))
}
