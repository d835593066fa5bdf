//! Log destinations from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// # Example
///
/// ```toml
/// [logging]
/// conversation_log = "./conversation.jsonl"
/// file = "./lore-forge.log"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL record of every model request and response
    pub conversation_log: Option<PathBuf>,
    /// Plain tracing output in addition to stderr
    pub file: Option<PathBuf>,
}
