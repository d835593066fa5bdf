//! Shared helpers for the generation use cases.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressNotifier;
use crate::store::StoreError;
use crate::use_cases::stages::{ArchetypeStages, StageError};
use lore_domain::{ChapterResult, NodePath};
use thiserror::Error;

/// Why a section (or a single chapter) stopped
#[derive(Error, Debug)]
pub enum GenerationFailure {
    #[error(transparent)]
    Stage(#[from] StageError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Draft and refine every page title of one chapter, strictly in order.
///
/// Nothing is written to the store here; the caller merges the result.
pub(crate) async fn write_chapter<G: LlmGateway + ?Sized>(
    stages: &ArchetypeStages<G>,
    section_title: &str,
    path: NodePath,
    chapter_title: &str,
    page_titles: &[String],
    progress: &dyn ProgressNotifier,
) -> Result<ChapterResult, StageError> {
    let mut pages = Vec::with_capacity(page_titles.len());
    for (index, title) in page_titles.iter().enumerate() {
        let page = stages
            .write_page(section_title, chapter_title, title)
            .await?;
        progress.on_page_complete(NodePath::page(path.section, path.chapter, index), title);
        pages.push(page);
    }

    Ok(ChapterResult {
        section_index: path.section,
        chapter_index: path.chapter,
        chapter_title: chapter_title.to_string(),
        pages,
    })
}
