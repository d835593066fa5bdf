//! Model value object representing a remote generative model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available generative models (Value Object)
///
/// Each archetype of the generation pipeline is bound to one of these.
/// Unknown identifiers are preserved as [`Model::Custom`] so that a config
/// file can point an archetype at any model the provider serves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gemini3Pro,
    Gemini3Flash,
    Gemini25Pro,
    Gemini25Flash,
    Gemini25FlashLite,
    Gemini25FlashTts,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini3Pro => "gemini-3-pro-preview",
            Model::Gemini3Flash => "gemini-3-flash-preview",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25FlashLite => "gemini-2.5-flash-lite-latest",
            Model::Gemini25FlashTts => "gemini-2.5-flash-preview-tts",
            Model::Custom(s) => s,
        }
    }

    /// Check if this model produces speech rather than text
    pub fn is_tts(&self) -> bool {
        match self {
            Model::Gemini25FlashTts => true,
            Model::Custom(s) => s.ends_with("-tts"),
            _ => false,
        }
    }
}

impl Default for Model {
    /// Returns the default text model (Gemini 3 Flash)
    fn default() -> Self {
        Model::Gemini3Flash
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gemini-3-pro-preview" => Model::Gemini3Pro,
            "gemini-3-flash-preview" => Model::Gemini3Flash,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite-latest" => Model::Gemini25FlashLite,
            "gemini-2.5-flash-preview-tts" => Model::Gemini25FlashTts,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
