//! Rate-limit aware dispatch.
//!
//! [`RetryingCaller`] is the only path from the stages to the gateway. Every
//! attempt passes through the [`ThrottleGate`] first; a rate-limited attempt
//! sleeps for the configured cooldown and tries again until the attempt
//! budget is spent.

use super::throttle_gate::ThrottleGate;
use crate::config::PacingParams;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::llm_gateway::{GatewayError, GenerationRequest, GenerationResponse, LlmGateway};
use serde_json::json;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Gateway wrapper that enforces per-model spacing and retries on 429.
pub struct RetryingCaller<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
    gate: Arc<ThrottleGate>,
    params: PacingParams,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + ?Sized> RetryingCaller<G> {
    pub fn new(gateway: Arc<G>, params: PacingParams) -> Self {
        Self {
            gateway,
            gate: Arc::new(ThrottleGate::new(params.min_interval)),
            params,
            logger: Arc::new(NoConversationLogger),
        }
    }

    // ==================== Builder Methods ====================

    /// Share a gate with other callers so they see the same per-model windows
    pub fn with_gate(mut self, gate: Arc<ThrottleGate>) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn gate(&self) -> &Arc<ThrottleGate> {
        &self.gate
    }

    pub fn params(&self) -> &PacingParams {
        &self.params
    }

    /// Dispatch `request`, retrying rate-limited attempts.
    ///
    /// Any error other than [`GatewayError::RateLimited`] is returned after
    /// the attempt that produced it. When every attempt is rate limited the
    /// result is [`GatewayError::RateLimitExhausted`].
    pub async fn call(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GatewayError> {
        let max_attempts = self.params.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            self.gate.acquire(&request.model).await;

            debug!(
                "Dispatching to {} (attempt {}/{})",
                request.model, attempt, max_attempts
            );
            self.logger.log(ConversationEvent::new(
                "llm_request",
                json!({
                    "model": request.model.as_str(),
                    "attempt": attempt,
                    "prompt": request.prompt,
                    "audio": request.wants_audio(),
                }),
            ));

            match self.gateway.generate(request).await {
                Ok(response) => {
                    self.log_response(request, &response);
                    return Ok(response);
                }
                Err(GatewayError::RateLimited(message)) => {
                    self.logger.log(ConversationEvent::new(
                        "rate_limited",
                        json!({
                            "model": request.model.as_str(),
                            "attempt": attempt,
                            "message": message,
                        }),
                    ));

                    if attempt >= max_attempts {
                        warn!(
                            "{} still rate limited after {} attempts",
                            request.model, attempt
                        );
                        return Err(GatewayError::RateLimitExhausted {
                            attempts: attempt,
                            message,
                        });
                    }

                    info!(
                        "Quota exceeded for {}. Cooling down for {}s...",
                        request.model,
                        self.params.cooldown.as_secs()
                    );
                    sleep(self.params.cooldown).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!("{} failed: {}", request.model, e);
                    self.logger.log(ConversationEvent::new(
                        "llm_error",
                        json!({
                            "model": request.model.as_str(),
                            "attempt": attempt,
                            "error": e.to_string(),
                        }),
                    ));
                    return Err(e);
                }
            }
        }
    }

    fn log_response(&self, request: &GenerationRequest, response: &GenerationResponse) {
        let payload = match response {
            GenerationResponse::Text(text) => json!({
                "model": request.model.as_str(),
                "text": text,
                "bytes": text.len(),
            }),
            GenerationResponse::Audio {
                data_base64,
                mime_type,
            } => json!({
                "model": request.model.as_str(),
                "mime_type": mime_type,
                "bytes": data_base64.len(),
            }),
        };
        self.logger.log(ConversationEvent::new("llm_response", payload));
    }
}
