//! Gemini HTTP gateway.
//!
//! One `POST {base}/v1beta/models/{model}:generateContent` per request,
//! authenticated with the `x-goog-api-key` header. No retries happen here;
//! rate-limit handling lives in the application's retrying caller.

use super::error::parse_api_error;
use super::types::{
    GeminiContent, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    SpeechConfig,
};
use async_trait::async_trait;
use lore_application::{GatewayError, GenerationRequest, GenerationResponse, LlmGateway};
use lore_domain::Model;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// [`LlmGateway`] backed by the Gemini REST API
pub struct GeminiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self, model: &Model) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model.as_str()
        )
    }

    fn build_body(request: &GenerationRequest) -> GenerateContentRequest {
        let options = &request.options;
        let mut config = GenerationConfig::default();

        if let Some(schema) = &options.response_schema {
            config.response_mime_type = Some("application/json".to_string());
            config.response_schema = Some(schema.clone());
        }
        if let Some(voice) = &options.voice {
            config.response_modalities = Some(vec!["AUDIO".to_string()]);
            config.speech_config = Some(SpeechConfig::prebuilt(voice.clone()));
        }

        let has_config = options.response_schema.is_some() || options.voice.is_some();
        GenerateContentRequest {
            contents: vec![GeminiContent::user_text(request.prompt.clone())],
            generation_config: has_config.then_some(config),
        }
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GatewayError> {
        let url = self.endpoint(&request.model);
        debug!("POST {} ({} prompt chars)", url, request.prompt.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_body(request))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            let info = parse_api_error(&body, status.as_u16());
            warn!(
                "Gemini API error for {}: HTTP {} {}",
                request.model,
                status.as_u16(),
                info.status.as_deref().unwrap_or("unknown")
            );
            return Err(info.into_gateway_error());
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if let Some(inline) = parsed.inline_data() {
            return Ok(GenerationResponse::Audio {
                data_base64: inline.data.clone(),
                mime_type: inline.mime_type.clone(),
            });
        }

        match parsed.text() {
            Some(text) => Ok(GenerationResponse::Text(text)),
            None => {
                warn!(
                    "{} returned no content (finish reason: {})",
                    request.model,
                    parsed.finish_reason().unwrap_or("none")
                );
                Ok(GenerationResponse::Text(String::new()))
            }
        }
    }
}
