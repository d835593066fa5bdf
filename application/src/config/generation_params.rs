//! Generation parameters: what each stage asks for.
//!
//! [`GenerationParams`] groups the static parameters that shape stage
//! requests: which model plays each archetype, how many pages the outline
//! proposes, and how narration is produced.

use lore_domain::ArchetypeModels;
use serde::{Deserialize, Serialize};

/// Stage request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Model bound to each archetype.
    pub models: ArchetypeModels,
    /// Page titles requested per chapter from the outline stage.
    pub pages_per_chapter: usize,
    /// Narration input is cut to this many characters.
    pub narration_max_chars: usize,
    /// Prebuilt voice used for narration.
    pub voice: String,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            models: ArchetypeModels::default(),
            pages_per_chapter: 5,
            narration_max_chars: 1000,
            voice: "Kore".to_string(),
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_models(mut self, models: ArchetypeModels) -> Self {
        self.models = models;
        self
    }

    pub fn with_pages_per_chapter(mut self, count: usize) -> Self {
        self.pages_per_chapter = count;
        self
    }

    pub fn with_narration_max_chars(mut self, max: usize) -> Self {
        self.narration_max_chars = max;
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }
}
