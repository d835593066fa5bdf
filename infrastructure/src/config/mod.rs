//! Configuration file loading for lore-forge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LORE_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./lore.toml` or `./.lore.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/lore-forge/config.toml`
//! 5. Default values

mod file_config;
mod issue;
mod loader;

pub use file_config::{
    DEFAULT_STORAGE_KEY, FileConfig, FileGenerationConfig, FileLoggingConfig, FileModelsConfig,
    FileProviderConfig, FileRetryConfig, FileStorageConfig, FileThrottleConfig,
};
pub use issue::{ConfigIssue, Severity};
pub use loader::{ConfigLoadError, ConfigLoader};
