//! Request pacing from TOML (`[throttle]` and `[retry]` sections)

use serde::{Deserialize, Serialize};

/// Minimum spacing between requests to the same model
///
/// # Example
///
/// ```toml
/// [throttle]
/// min_interval_secs = 31
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileThrottleConfig {
    pub min_interval_secs: u64,
}

impl Default for FileThrottleConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: 31,
        }
    }
}

/// Rate-limit retry policy
///
/// # Example
///
/// ```toml
/// [retry]
/// max_attempts = 3
/// cooldown_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_attempts: u32,
    pub cooldown_secs: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            cooldown_secs: 60,
        }
    }
}
