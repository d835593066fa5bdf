//! Generation settings from TOML (`[generation]` section)

use serde::{Deserialize, Serialize};

/// Pipeline knobs that are not model bindings
///
/// # Example
///
/// ```toml
/// [generation]
/// pages_per_chapter = 5
/// narration_max_chars = 1000
/// voice = "Kore"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Page titles requested per chapter outline
    pub pages_per_chapter: usize,
    /// Page text beyond this many characters is not narrated
    pub narration_max_chars: usize,
    /// Prebuilt voice used by the Dreamer
    pub voice: String,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            pages_per_chapter: 5,
            narration_max_chars: 1000,
            voice: "Kore".to_string(),
        }
    }
}
