// Constants for the retry framework
use std::time::Duration;

use crate::position::PositionMatcher;

/// Default number of retries (not attempts) a factory allows
pub const DEFAULT_MAX_RETRY_COUNT: u32 = 3;

/// Default fixed delay applied before every retry
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Default attempt positions worth logging
pub const DEFAULT_LOG_POSITIONS: PositionMatcher = PositionMatcher::FirstAndLastOnly;

/// Environment variable holding the maximum retry count
pub const ENV_MAX_RETRY_COUNT: &str = "STEADFAST_RETRY_MAX_RETRY_COUNT";

/// Environment variable holding the retry delay in milliseconds
pub const ENV_DELAY_MS: &str = "STEADFAST_RETRY_DELAY_MS";

/// Environment variable naming the attempt positions to log
pub const ENV_LOG_POSITIONS: &str = "STEADFAST_RETRY_LOG_POSITIONS";
