//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application
//! parameters after validation.

mod generation;
mod logging;
mod models;
mod pacing;
mod provider;
mod storage;

pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use pacing::{FileRetryConfig, FileThrottleConfig};
pub use provider::FileProviderConfig;
pub use storage::{DEFAULT_STORAGE_KEY, FileStorageConfig};

use super::issue::ConfigIssue;
use lore_application::{GenerationParams, PacingParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model per archetype
    pub models: FileModelsConfig,
    /// Per-model request spacing
    pub throttle: FileThrottleConfig,
    /// Rate-limit retry policy
    pub retry: FileRetryConfig,
    /// Outline size, narration limits and voice
    pub generation: FileGenerationConfig,
    /// Book, export and audio locations
    pub storage: FileStorageConfig,
    /// API key variable and endpoint override
    pub provider: FileProviderConfig,
    /// Conversation and file logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors mean the value was replaced by its default when converting;
    /// the caller decides whether to continue.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.models.to_archetype_models().1;

        if self.retry.max_attempts == 0 {
            issues.push(ConfigIssue::error(
                "retry.max_attempts",
                "must allow at least one attempt",
            ));
        }
        if self.throttle.min_interval_secs == 0 {
            issues.push(ConfigIssue::warning(
                "throttle.min_interval_secs",
                "0 disables spacing; free-tier quotas will reject bursts",
            ));
        }
        if self.generation.pages_per_chapter == 0 {
            issues.push(ConfigIssue::error(
                "generation.pages_per_chapter",
                "must request at least one page",
            ));
        }
        if self.generation.narration_max_chars == 0 {
            issues.push(ConfigIssue::error(
                "generation.narration_max_chars",
                "must be greater than zero",
            ));
        }
        if self.generation.voice.trim().is_empty() {
            issues.push(ConfigIssue::error("generation.voice", "voice cannot be empty"));
        }
        if self.storage.key.trim().is_empty() {
            issues.push(ConfigIssue::error("storage.key", "key cannot be empty"));
        }
        if self.provider.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "provider.api_key_env",
                "environment variable name cannot be empty",
            ));
        }

        issues
    }

    /// Pacing parameters, with invalid values replaced by defaults
    pub fn pacing_params(&self) -> PacingParams {
        let defaults = PacingParams::default();
        let max_attempts = match self.retry.max_attempts {
            0 => defaults.max_attempts,
            n => n,
        };
        defaults
            .with_min_interval(Duration::from_secs(self.throttle.min_interval_secs))
            .with_max_attempts(max_attempts)
            .with_cooldown(Duration::from_secs(self.retry.cooldown_secs))
    }

    /// Generation parameters, with invalid values replaced by defaults
    pub fn generation_params(&self) -> GenerationParams {
        let defaults = GenerationParams::default();
        let generation = &self.generation;

        let pages_per_chapter = match generation.pages_per_chapter {
            0 => defaults.pages_per_chapter,
            n => n,
        };
        let narration_max_chars = match generation.narration_max_chars {
            0 => defaults.narration_max_chars,
            n => n,
        };
        let voice = match generation.voice.trim() {
            "" => defaults.voice.clone(),
            v => v.to_string(),
        };

        defaults
            .with_models(self.models.to_archetype_models().0)
            .with_pages_per_chapter(pages_per_chapter)
            .with_narration_max_chars(narration_max_chars)
            .with_voice(voice)
    }
}
