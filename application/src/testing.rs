//! Scripted gateway shared by the application tests.

use crate::ports::llm_gateway::{
    GatewayError, GenerationRequest, GenerationResponse, LlmGateway,
};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lore_domain::{ArchetypeModels, Model};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{Instant, sleep};

type Responder =
    dyn Fn(&GenerationRequest) -> Result<GenerationResponse, GatewayError> + Send + Sync;

/// One dispatched request with the times it was accepted and answered
#[derive(Debug, Clone)]
pub(crate) struct CallRecord {
    pub model: Model,
    pub prompt: String,
    pub started: Instant,
    pub finished: Instant,
}

/// Gateway that answers from a closure and records every dispatch
pub(crate) struct ScriptedGateway {
    responder: Box<Responder>,
    latency: HashMap<Model, Duration>,
    calls: Mutex<Vec<CallRecord>>,
}

impl ScriptedGateway {
    pub fn new(
        responder: impl Fn(&GenerationRequest) -> Result<GenerationResponse, GatewayError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            latency: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A well-behaved provider for the default archetype bindings.
    ///
    /// The outline echoes every chapter named in the prompt with
    /// `pages_per_chapter` titles, drafts are `"Draft of <page>"` and
    /// refinements wrap the draft as `"Refined: <draft>"`.
    pub fn pipeline(models: ArchetypeModels, pages_per_chapter: usize) -> Self {
        Self::new(move |request| respond_as_pipeline(&models, pages_per_chapter, request))
    }

    pub fn with_latency(mut self, model: Model, latency: Duration) -> Self {
        self.latency.insert(model, latency);
        self
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, model: &Model) -> Vec<CallRecord> {
        self.calls()
            .into_iter()
            .filter(|c| &c.model == model)
            .collect()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GatewayError> {
        let started = Instant::now();
        if let Some(latency) = self.latency.get(&request.model) {
            sleep(*latency).await;
        }
        let result = (self.responder)(request);
        self.calls.lock().unwrap().push(CallRecord {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            started,
            finished: Instant::now(),
        });
        result
    }
}

pub(crate) fn respond_as_pipeline(
    models: &ArchetypeModels,
    pages_per_chapter: usize,
    request: &GenerationRequest,
) -> Result<GenerationResponse, GatewayError> {
    let prompt = request.prompt.as_str();
    if request.model == models.brains {
        let chapters: Vec<serde_json::Value> = domains_in(prompt)
            .into_iter()
            .map(|chapter| {
                let titles: Vec<String> = (1..=pages_per_chapter)
                    .map(|n| format!("{} objective {}", chapter, n))
                    .collect();
                serde_json::json!({"chapterTitle": chapter, "titles": titles})
            })
            .collect();
        Ok(GenerationResponse::Text(
            serde_json::json!({ "chapters": chapters }).to_string(),
        ))
    } else if request.model == models.serious {
        let page = quoted_after(prompt, "MISSION: ").unwrap_or_default();
        Ok(GenerationResponse::Text(format!("Draft of {}", page)))
    } else if request.model == models.clown {
        let draft = line_after(prompt, "INPUT TEXT (from The Serious): ").unwrap_or_default();
        Ok(GenerationResponse::Text(format!("Refined: {}", draft)))
    } else if request.model == models.dreamer {
        Ok(GenerationResponse::Audio {
            data_base64: STANDARD.encode([0x00, 0x80, 0x00, 0x00, 0xff, 0x7f]),
            mime_type: Some("audio/L16;codec=pcm;rate=24000".to_string()),
        })
    } else {
        Err(GatewayError::RequestFailed(format!(
            "unknown model {}",
            request.model
        )))
    }
}

/// Chapter titles listed on the outline prompt's `DOMAINS:` line
pub(crate) fn domains_in(prompt: &str) -> Vec<String> {
    line_after(prompt, "DOMAINS: ")
        .map(|line| {
            line.trim_end_matches('.')
                .split(", ")
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn line_after<'a>(prompt: &'a str, prefix: &str) -> Option<&'a str> {
    prompt.lines().find_map(|line| line.strip_prefix(prefix))
}

pub(crate) fn quoted_after(prompt: &str, prefix: &str) -> Option<String> {
    let rest = line_after(prompt, prefix)?.strip_prefix('"')?;
    rest.split_once('"').map(|(quoted, _)| quoted.to_string())
}
