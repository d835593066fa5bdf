//! Storage locations from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_STORAGE_KEY: &str = "ice-wall-expedition-v1";

/// Where the book, exports and narration clips are written
///
/// Unset directories fall back to the platform data directory.
///
/// # Example
///
/// ```toml
/// [storage]
/// dir = "~/.local/share/lore-forge"
/// key = "ice-wall-expedition-v1"
/// export_dir = "./out"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    pub dir: Option<PathBuf>,
    /// File stem of the saved book
    pub key: String,
    pub export_dir: Option<PathBuf>,
    pub audio_dir: Option<PathBuf>,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
            export_dir: None,
            audio_dir: None,
        }
    }
}
