//! Provider access from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// How to reach the Gemini API
///
/// The key itself never lives in the file, only the name of the
/// environment variable holding it.
///
/// # Example
///
/// ```toml
/// [provider]
/// api_key_env = "GEMINI_API_KEY"
/// base_url = "http://localhost:8080"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub api_key_env: String,
    pub base_url: Option<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "API_KEY".to_string(),
            base_url: None,
        }
    }
}
