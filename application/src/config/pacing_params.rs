//! Pacing parameters: per-model spacing and rate-limit retry budget.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How calls to the remote service are spaced and retried.
///
/// `min_interval` sits just above a 30-second provider window. `cooldown`
/// is only applied after a rate-limit failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingParams {
    /// Minimum time between two dispatches to the same model.
    pub min_interval: Duration,
    /// Total attempts per call when the provider keeps answering 429.
    pub max_attempts: u32,
    /// Sleep between a rate-limited attempt and the next one.
    pub cooldown: Duration,
}

impl Default for PacingParams {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(31),
            max_attempts: 3,
            cooldown: Duration::from_secs(60),
        }
    }
}

impl PacingParams {
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = PacingParams::default();
        assert_eq!(params.min_interval, Duration::from_secs(31));
        assert_eq!(params.max_attempts, 3);
        assert_eq!(params.cooldown, Duration::from_secs(60));
    }
}
