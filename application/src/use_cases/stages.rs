//! The four archetype stages.
//!
//! Each stage builds its prompt, dispatches through the [`RetryingCaller`]
//! with the model bound to its archetype, and turns the answer into a
//! domain value.

use crate::config::GenerationParams;
use crate::pacing::RetryingCaller;
use crate::ports::llm_gateway::{GatewayError, GenerationRequest, GenerationResponse, LlmGateway};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lore_domain::{
    Archetype, AudioClip, ChapterOutline, DomainError, Model, PageDraft, PromptTemplate, Section,
    parse_outline_response,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors from a single stage call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Malformed outline: {0}")]
    MalformedOutline(String),

    #[error("No audio in response from {model}")]
    MissingAudio { model: String },

    #[error("Malformed audio payload: {0}")]
    MalformedAudio(String),

    #[error(transparent)]
    Domain(DomainError),
}

impl From<DomainError> for StageError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MalformedOutline(msg) => StageError::MalformedOutline(msg),
            DomainError::MalformedAudio(msg) => StageError::MalformedAudio(msg),
            other => StageError::Domain(other),
        }
    }
}

/// Stage functions bound to one caller and one set of parameters
pub struct ArchetypeStages<G: LlmGateway + ?Sized> {
    caller: Arc<RetryingCaller<G>>,
    params: GenerationParams,
}

impl<G: LlmGateway + ?Sized> ArchetypeStages<G> {
    pub fn new(caller: Arc<RetryingCaller<G>>, params: GenerationParams) -> Self {
        Self { caller, params }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    fn model(&self, archetype: Archetype) -> Model {
        self.params.models.model_for(archetype).clone()
    }

    /// Brains: page titles for every chapter of `section`
    pub async fn outline(&self, section: &Section) -> Result<Vec<ChapterOutline>, StageError> {
        let prompt = PromptTemplate::outline_prompt(
            &section.title,
            &section.chapter_titles(),
            self.params.pages_per_chapter,
        );
        let request = GenerationRequest::new(self.model(Archetype::Brains), prompt)
            .with_schema(PromptTemplate::outline_schema());

        let text = self.caller.call(&request).await?.into_text()?;
        let outlines = parse_outline_response(&text)?;
        debug!(
            "Outline for {}: {} chapter records",
            section.title,
            outlines.len()
        );
        Ok(outlines)
    }

    /// Serious: the action draft for one page
    pub async fn draft(
        &self,
        section_title: &str,
        chapter_title: &str,
        page_title: &str,
    ) -> Result<String, StageError> {
        let prompt = PromptTemplate::draft_prompt(section_title, chapter_title, page_title);
        let request = GenerationRequest::new(self.model(Archetype::Serious), prompt);
        Ok(self.caller.call(&request).await?.into_text()?)
    }

    /// Clown: the draft wrapped in banter. The text is used verbatim.
    pub async fn refine(
        &self,
        section_title: &str,
        chapter_title: &str,
        page_title: &str,
        draft: &str,
    ) -> Result<String, StageError> {
        let prompt =
            PromptTemplate::refine_prompt(section_title, chapter_title, page_title, draft);
        let request = GenerationRequest::new(self.model(Archetype::Clown), prompt);
        Ok(self.caller.call(&request).await?.into_text()?)
    }

    /// Draft then refine one page. The refine call is not issued before the
    /// draft has resolved.
    pub async fn write_page(
        &self,
        section_title: &str,
        chapter_title: &str,
        page_title: &str,
    ) -> Result<PageDraft, StageError> {
        let draft = self.draft(section_title, chapter_title, page_title).await?;
        let refined = self
            .refine(section_title, chapter_title, page_title, &draft)
            .await?;
        Ok(PageDraft::new(page_title, draft, refined))
    }

    /// Dreamer: speech audio for `text`
    pub async fn narrate(&self, text: &str) -> Result<AudioClip, StageError> {
        let model = self.model(Archetype::Dreamer);
        let prompt = PromptTemplate::narration_prompt(text, self.params.narration_max_chars);
        let request = GenerationRequest::new(model.clone(), prompt).with_voice(&self.params.voice);

        match self.caller.call(&request).await? {
            GenerationResponse::Audio { data_base64, .. } if !data_base64.is_empty() => {
                let bytes = STANDARD
                    .decode(data_base64.trim())
                    .map_err(|e| StageError::MalformedAudio(e.to_string()))?;
                let clip = AudioClip::from_pcm16_le(&bytes);
                debug!("Narration decoded: {:.1}s", clip.duration_secs());
                Ok(clip)
            }
            _ => Err(StageError::MissingAudio {
                model: model.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PacingParams;
    use crate::testing::ScriptedGateway;
    use lore_domain::{ArchetypeModels, Chapter};

    fn stages(gateway: Arc<ScriptedGateway>) -> ArchetypeStages<ScriptedGateway> {
        let caller = Arc::new(RetryingCaller::new(gateway, PacingParams::default()));
        ArchetypeStages::new(caller, GenerationParams::default().with_pages_per_chapter(2))
    }

    fn section() -> Section {
        Section::new(
            "The Archive of Silences",
            vec![Chapter::new("Silicon Ruins Beyond the Rim")],
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_outline_uses_brains_model_and_schema() {
        let gateway = Arc::new(ScriptedGateway::pipeline(ArchetypeModels::default(), 2));
        let outlines = stages(Arc::clone(&gateway))
            .outline(&section())
            .await
            .unwrap();

        assert_eq!(outlines.len(), 1);
        assert_eq!(outlines[0].chapter_title, "Silicon Ruins Beyond the Rim");
        assert_eq!(outlines[0].titles.len(), 2);
        assert_eq!(gateway.calls_to(&Model::Gemini3Pro).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_outline() {
        let gateway = Arc::new(ScriptedGateway::new(|_| {
            Ok(GenerationResponse::Text("the ice is silent".to_string()))
        }));
        let err = stages(gateway).outline(&section()).await.unwrap_err();
        assert!(matches!(err, StageError::MalformedOutline(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_page_keeps_draft_and_refinement() {
        let gateway = Arc::new(ScriptedGateway::pipeline(ArchetypeModels::default(), 2));
        let page = stages(Arc::clone(&gateway))
            .write_page("S", "C", "Glow")
            .await
            .unwrap();

        assert_eq!(page.title, "Glow");
        assert_eq!(page.draft, "Draft of Glow");
        assert_eq!(page.refined, "Refined: Draft of Glow");

        let calls = gateway.calls();
        assert_eq!(calls[0].model, Model::Gemini3Flash);
        assert_eq!(calls[1].model, Model::Gemini25FlashLite);
        assert!(calls[1].started >= calls[0].finished);
    }

    #[tokio::test(start_paused = true)]
    async fn test_narrate_decodes_pcm() {
        let gateway = Arc::new(ScriptedGateway::pipeline(ArchetypeModels::default(), 2));
        let clip = stages(Arc::clone(&gateway))
            .narrate("The wall hums.")
            .await
            .unwrap();

        assert_eq!(clip.sample_rate, 24_000);
        assert_eq!(clip.samples, vec![-1.0, 0.0, 32767.0 / 32768.0]);

        let prompt = &gateway.calls_to(&Model::Gemini25FlashTts)[0].prompt;
        assert_eq!(prompt, "Listen to the ice... The wall hums.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_narrate_without_audio() {
        let gateway = Arc::new(ScriptedGateway::new(|_| {
            Ok(GenerationResponse::Text("no voice today".to_string()))
        }));
        let err = stages(gateway).narrate("text").await.unwrap_err();
        assert_eq!(
            err,
            StageError::MissingAudio {
                model: "gemini-2.5-flash-preview-tts".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_gateway_errors_pass_through() {
        let gateway = Arc::new(ScriptedGateway::new(|_| {
            Err(GatewayError::RequestFailed("400".to_string()))
        }));
        let err = stages(gateway).draft("S", "C", "P").await.unwrap_err();
        assert_eq!(
            err,
            StageError::Gateway(GatewayError::RequestFailed("400".to_string()))
        );
    }
}
