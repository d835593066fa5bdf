//! Generate Chapter use case
//!
//! Rewrites one chapter from the page titles it already has. No outline
//! call is made; each page is drafted and refined in order and the chapter
//! is replaced in one merge.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::store::DocumentStore;
use crate::use_cases::shared::{GenerationFailure, write_chapter};
use crate::use_cases::stages::ArchetypeStages;
use lore_domain::{ChapterResult, DomainError, GenerationProgress, NodePath};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GenerateChapterError {
    #[error(transparent)]
    InvalidPath(#[from] DomainError),

    #[error(transparent)]
    Failed(#[from] GenerationFailure),
}

pub struct GenerateChapterUseCase<G: LlmGateway + ?Sized> {
    stages: Arc<ArchetypeStages<G>>,
    store: Arc<DocumentStore>,
}

impl<G: LlmGateway + ?Sized> GenerateChapterUseCase<G> {
    pub fn new(stages: Arc<ArchetypeStages<G>>, store: Arc<DocumentStore>) -> Self {
        Self { stages, store }
    }

    pub async fn execute(&self, path: NodePath) -> Result<ChapterResult, GenerateChapterError> {
        self.execute_with_progress(path, &NoProgress).await
    }

    /// `path` may address the chapter or any page in it; the whole chapter
    /// is regenerated either way.
    pub async fn execute_with_progress(
        &self,
        path: NodePath,
        progress: &dyn ProgressNotifier,
    ) -> Result<ChapterResult, GenerateChapterError> {
        let path = path.to_chapter();
        let book = self.store.snapshot();
        let (chapter, _) = book.resolve(&path)?;
        let section_title = book
            .section(path.section)
            .map(|s| s.title.clone())
            .ok_or_else(|| DomainError::InvalidPath(path.to_string()))?;

        info!(
            "Regenerating \"{}\" ({} pages)",
            chapter.title,
            chapter.pages.len()
        );
        let labels = GenerationProgress {
            section_label: GenerationProgress::section_label_for(&section_title),
            chapter_label: GenerationProgress::chapter_label_for(&chapter.title),
        };
        progress.on_chapter_start(path, &labels);

        let result = write_chapter(
            &self.stages,
            &section_title,
            path,
            &chapter.title,
            &chapter.page_titles(),
            progress,
        )
        .await
        .map_err(GenerationFailure::from)?;

        self.store
            .merge_chapter(&result)
            .map_err(GenerationFailure::from)?;
        progress.on_chapter_merged(path, result.pages.len());
        Ok(result)
    }
}
