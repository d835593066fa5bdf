//! Archetype model bindings from TOML (`[models]` section)

use crate::config::issue::ConfigIssue;
use lore_domain::{Archetype, ArchetypeModels, Model};
use serde::{Deserialize, Serialize};

/// Model bound to each archetype
///
/// # Example
///
/// ```toml
/// [models]
/// brains = "gemini-3-pro-preview"          # Outline planning
/// serious = "gemini-3-flash-preview"       # Action drafts
/// clown = "gemini-2.5-flash-lite-latest"   # Banter refinement
/// dreamer = "gemini-2.5-flash-preview-tts" # Narration
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub brains: Option<String>,
    pub serious: Option<String>,
    pub clown: Option<String>,
    pub dreamer: Option<String>,
}

impl FileModelsConfig {
    fn value(&self, archetype: Archetype) -> Option<&String> {
        match archetype {
            Archetype::Brains => self.brains.as_ref(),
            Archetype::Serious => self.serious.as_ref(),
            Archetype::Clown => self.clown.as_ref(),
            Archetype::Dreamer => self.dreamer.as_ref(),
        }
    }

    /// Resolve the bindings, falling back to the default model for any
    /// archetype left unset or set to an empty name.
    pub fn to_archetype_models(&self) -> (ArchetypeModels, Vec<ConfigIssue>) {
        let mut models = ArchetypeModels::default();
        let mut issues = Vec::new();

        for archetype in Archetype::ALL {
            let model = match self.value(archetype) {
                None => continue,
                Some(name) if name.trim().is_empty() => {
                    issues.push(ConfigIssue::error(
                        format!("models.{}", archetype.as_str()),
                        "model name cannot be empty",
                    ));
                    continue;
                }
                Some(name) => Model::from(name.trim()),
            };

            models = match archetype {
                Archetype::Brains => models.with_brains(model),
                Archetype::Serious => models.with_serious(model),
                Archetype::Clown => models.with_clown(model),
                Archetype::Dreamer => models.with_dreamer(model),
            };
        }

        if !models.dreamer.is_tts() {
            issues.push(ConfigIssue::warning(
                "models.dreamer",
                format!("'{}' does not look like a speech model", models.dreamer),
            ));
        }

        (models, issues)
    }
}
