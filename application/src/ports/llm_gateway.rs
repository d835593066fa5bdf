//! LLM Gateway port
//!
//! Defines the interface for calling the remote inference service.

use async_trait::async_trait;
use lore_domain::Model;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The provider signalled quota exhaustion (HTTP 429 or equivalent)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Rate limiting persisted through every allowed attempt
    #[error("Rate limit persisted after {attempts} attempts: {message}")]
    RateLimitExhausted { attempts: u32, message: String },

    /// Malformed request, rejected schema, or any other non-throttle API error
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The request never produced an HTTP response
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but did not contain what was asked for
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Whether this failure is quota exhaustion that a cooldown may cure
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GatewayError::RateLimited(_))
    }
}

/// Per-request options beyond the prompt
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Ask for schema-validated JSON output
    pub response_schema: Option<Value>,
    /// Ask for an audio response spoken with this prebuilt voice
    pub voice: Option<String>,
}

/// A single generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: Model,
    pub prompt: String,
    pub options: RequestOptions,
}

impl GenerationRequest {
    pub fn new(model: Model, prompt: impl Into<String>) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            options: RequestOptions::default(),
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.options.response_schema = Some(schema);
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.options.voice = Some(voice.into());
        self
    }

    pub fn wants_audio(&self) -> bool {
        self.options.voice.is_some()
    }
}

/// What the remote service returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResponse {
    Text(String),
    Audio {
        /// Base64 of signed 16-bit little-endian PCM
        data_base64: String,
        mime_type: Option<String>,
    },
}

impl GenerationResponse {
    /// Text body, or `InvalidResponse` if the service answered with audio
    pub fn into_text(self) -> Result<String, GatewayError> {
        match self {
            GenerationResponse::Text(text) => Ok(text),
            GenerationResponse::Audio { .. } => Err(GatewayError::InvalidResponse(
                "expected text but received audio".to_string(),
            )),
        }
    }
}

/// Gateway for the remote inference service
///
/// This port defines how the application layer talks to model providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Dispatch one request and wait for its result
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_classification() {
        assert!(GatewayError::RateLimited("429".to_string()).is_rate_limited());
        assert!(!GatewayError::RequestFailed("400".to_string()).is_rate_limited());
        assert!(
            !GatewayError::RateLimitExhausted {
                attempts: 3,
                message: "429".to_string()
            }
            .is_rate_limited()
        );
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new(Model::Gemini3Pro, "plan")
            .with_schema(serde_json::json!({"type": "OBJECT"}));
        assert!(request.options.response_schema.is_some());
        assert!(!request.wants_audio());

        let speech = GenerationRequest::new(Model::Gemini25FlashTts, "hi").with_voice("Kore");
        assert!(speech.wants_audio());
    }

    #[test]
    fn test_into_text_rejects_audio() {
        let audio = GenerationResponse::Audio {
            data_base64: String::new(),
            mime_type: None,
        };
        assert!(matches!(audio.into_text(), Err(GatewayError::InvalidResponse(_))));
        assert_eq!(
            GenerationResponse::Text("ok".to_string()).into_text().unwrap(),
            "ok"
        );
    }
}
