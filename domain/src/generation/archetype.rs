//! Archetypes: the four fixed generation roles and their model bindings.

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// One of the four generation roles.
///
/// | Archetype | Stage | Output |
/// |-----------|-------|--------|
/// | Brains    | outline planning | page titles per chapter (JSON) |
/// | Serious   | action drafting  | narrative draft per page |
/// | Clown     | ensemble refinement | refined narrative per page |
/// | Dreamer   | narration | speech audio |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Brains,
    Serious,
    Clown,
    Dreamer,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Brains,
        Archetype::Serious,
        Archetype::Clown,
        Archetype::Dreamer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Brains => "brains",
            Archetype::Serious => "serious",
            Archetype::Clown => "clown",
            Archetype::Dreamer => "dreamer",
        }
    }

    /// Name of the stage this archetype performs
    pub fn stage_name(&self) -> &'static str {
        match self {
            Archetype::Brains => "outline",
            Archetype::Serious => "draft",
            Archetype::Clown => "refine",
            Archetype::Dreamer => "narrate",
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Model binding per archetype.
///
/// A static value object; the orchestrator reads it, never changes it.
///
/// # Example
///
/// ```
/// use lore_domain::{ArchetypeModels, Model};
///
/// let models = ArchetypeModels::default().with_clown(Model::Gemini25Flash);
/// assert_eq!(models.clown, Model::Gemini25Flash);
/// assert_eq!(models.brains, Model::Gemini3Pro);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeModels {
    /// Strategic structure (outline planning)
    pub brains: Model,
    /// Action and technical detail (drafting)
    pub serious: Model,
    /// Banter and sarcastic refinement
    pub clown: Model,
    /// Atmospheric voice (text-to-speech)
    pub dreamer: Model,
}

impl Default for ArchetypeModels {
    fn default() -> Self {
        Self {
            brains: Model::Gemini3Pro,
            serious: Model::Gemini3Flash,
            clown: Model::Gemini25FlashLite,
            dreamer: Model::Gemini25FlashTts,
        }
    }
}

impl ArchetypeModels {
    // ==================== Builder Methods ====================

    pub fn with_brains(mut self, model: Model) -> Self {
        self.brains = model;
        self
    }

    pub fn with_serious(mut self, model: Model) -> Self {
        self.serious = model;
        self
    }

    pub fn with_clown(mut self, model: Model) -> Self {
        self.clown = model;
        self
    }

    pub fn with_dreamer(mut self, model: Model) -> Self {
        self.dreamer = model;
        self
    }

    /// Model bound to the given archetype
    pub fn model_for(&self, archetype: Archetype) -> &Model {
        match archetype {
            Archetype::Brains => &self.brains,
            Archetype::Serious => &self.serious,
            Archetype::Clown => &self.clown,
            Archetype::Dreamer => &self.dreamer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_are_distinct() {
        let models = ArchetypeModels::default();
        let mut ids: Vec<_> = Archetype::ALL
            .iter()
            .map(|a| models.model_for(*a).as_str().to_string())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert!(models.dreamer.is_tts());
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Archetype::Brains.stage_name(), "outline");
        assert_eq!(Archetype::Clown.stage_name(), "refine");
    }
}
