//! Narrate Page use case
//!
//! Speaks one page body with the Dreamer voice and hands the clip to the
//! audio sink.

use crate::ports::audio_sink::{AudioSink, AudioSinkError};
use crate::ports::llm_gateway::LlmGateway;
use crate::store::DocumentStore;
use crate::use_cases::stages::{ArchetypeStages, StageError};
use lore_domain::{AudioClip, DomainError, NodePath};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum NarratePageError {
    #[error(transparent)]
    InvalidPath(#[from] DomainError),

    #[error("Page {0} has no content to narrate")]
    EmptyPage(NodePath),

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error(transparent)]
    Sink(#[from] AudioSinkError),
}

pub struct NarratePageUseCase<G: LlmGateway + ?Sized> {
    stages: Arc<ArchetypeStages<G>>,
    store: Arc<DocumentStore>,
    sink: Arc<dyn AudioSink>,
}

impl<G: LlmGateway + ?Sized> NarratePageUseCase<G> {
    pub fn new(
        stages: Arc<ArchetypeStages<G>>,
        store: Arc<DocumentStore>,
        sink: Arc<dyn AudioSink>,
    ) -> Self {
        Self {
            stages,
            store,
            sink,
        }
    }

    /// `path` must address a page with a non-empty body.
    pub async fn execute(&self, path: NodePath) -> Result<AudioClip, NarratePageError> {
        let book = self.store.snapshot();
        let page = match book.resolve(&path)? {
            (_, Some(page)) => page,
            (_, None) => return Err(DomainError::InvalidPath(path.to_string()).into()),
        };
        if page.is_empty() {
            return Err(NarratePageError::EmptyPage(path));
        }

        info!("Narrating \"{}\"", page.title);
        let clip = self.stages.narrate(&page.content).await?;
        self.sink.play(&clip)?;
        Ok(clip)
    }
}
