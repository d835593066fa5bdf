//! Generate Book use case
//!
//! Fills the whole book in one run. Sections are processed concurrently on
//! the caller's task; inside a section the outline call comes first, then
//! chapters strictly in order, and within a chapter each page is drafted
//! and refined before the next page starts. A chapter is merged into the
//! document store once all of its pages are done.
//!
//! A failing section does not stop the others: chains that are already
//! running finish (or fail on their own), merged chapters stay, and the run
//! ends aborted with the first failure.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::store::{DocumentStore, StoreError};
use crate::use_cases::shared::{GenerationFailure, write_chapter};
use crate::use_cases::stages::ArchetypeStages;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use lore_domain::{ChapterOutline, ChapterResult, DomainError, GenerationRun, NodePath};
use serde_json::json;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Errors that end a book run
#[derive(Error, Debug)]
pub enum GenerateBookError {
    #[error("A generation run is already in progress")]
    AlreadyRunning,

    #[error("Expedition Aborted: {failure}")]
    Aborted {
        failure: GenerationFailure,
        /// Chapters merged before and after the failure
        committed: Vec<ChapterResult>,
    },
}

const ABORT_PREFIX: &str = "Expedition Aborted";

/// Aborts the run if `execute` is dropped before reaching a terminal state,
/// so a cancelled run never stays `Running`.
struct RunGuard<'a> {
    run: &'a watch::Sender<GenerationRun>,
    armed: bool,
}

impl<'a> RunGuard<'a> {
    fn new(run: &'a watch::Sender<GenerationRun>) -> Self {
        Self { run, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("Generation run dropped before it finished");
        self.run.send_modify(|run| {
            if run.is_active()
                && let Err(e) = run.abort(format!("{}: run cancelled", ABORT_PREFIX))
            {
                warn!("{}", e);
            }
        });
    }
}

/// Chapters produced by a completed run, in completion order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub chapters: Vec<ChapterResult>,
}

impl RunReport {
    pub fn page_count(&self) -> usize {
        self.chapters.iter().map(|c| c.pages.len()).sum()
    }
}

/// Use case for generating every chapter of the book
pub struct GenerateBookUseCase<G: LlmGateway + ?Sized> {
    stages: Arc<ArchetypeStages<G>>,
    store: Arc<DocumentStore>,
    run: watch::Sender<GenerationRun>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + ?Sized> GenerateBookUseCase<G> {
    pub fn new(stages: Arc<ArchetypeStages<G>>, store: Arc<DocumentStore>) -> Self {
        let (run, _) = watch::channel(GenerationRun::new());
        Self {
            stages,
            store,
            run,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Live run state: status, progress labels and the abort message
    pub fn subscribe(&self) -> watch::Receiver<GenerationRun> {
        self.run.subscribe()
    }

    pub fn run_state(&self) -> GenerationRun {
        self.run.borrow().clone()
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self) -> Result<RunReport, GenerateBookError> {
        self.execute_with_progress(&NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        progress: &dyn ProgressNotifier,
    ) -> Result<RunReport, GenerateBookError> {
        let mut started = Ok(());
        self.run.send_if_modified(|run| {
            started = run.start();
            started.is_ok()
        });
        if started.is_err() {
            return Err(GenerateBookError::AlreadyRunning);
        }
        let mut guard = RunGuard::new(&self.run);

        let book = self.store.snapshot();
        info!(
            "Starting expedition: {} sections, {} chapters",
            book.sections.len(),
            book.chapter_count()
        );
        progress.on_run_start(book.sections.len(), book.chapter_count());

        let committed = Mutex::new(Vec::new());
        let mut sections: FuturesUnordered<_> = (0..book.sections.len())
            .map(|index| self.generate_section(index, progress, &committed))
            .collect();

        let mut first_failure = None;
        while let Some(outcome) = sections.next().await {
            if let Err(e) = outcome {
                warn!("Section failed: {}", e);
                if first_failure.is_none() {
                    first_failure = Some(e);
                }
            }
        }
        drop(sections);

        let chapters = match committed.into_inner() {
            Ok(chapters) => chapters,
            Err(poisoned) => poisoned.into_inner(),
        };

        let result = match first_failure {
            None => {
                self.run.send_modify(|run| {
                    if let Err(e) = run.complete() {
                        warn!("{}", e);
                    }
                });
                info!("Expedition complete: {} chapters merged", chapters.len());
                Ok(RunReport { chapters })
            }
            Some(failure) => {
                let message = format!("{}: {}", ABORT_PREFIX, failure);
                self.run.send_modify(|run| {
                    if let Err(e) = run.abort(message) {
                        warn!("{}", e);
                    }
                });
                Err(GenerateBookError::Aborted {
                    failure,
                    committed: chapters,
                })
            }
        };
        guard.disarm();

        let final_state = self.run_state();
        self.logger.log(ConversationEvent::new(
            "run_complete",
            json!({
                "status": final_state.status().as_str(),
                "error": final_state.error(),
            }),
        ));
        progress.on_run_complete(&final_state);
        result
    }

    /// Outline one section, then write and merge its chapters in order
    async fn generate_section(
        &self,
        index: usize,
        progress: &dyn ProgressNotifier,
        committed: &Mutex<Vec<ChapterResult>>,
    ) -> Result<(), GenerationFailure> {
        let section = self
            .store
            .snapshot()
            .section(index)
            .cloned()
            .ok_or_else(|| StoreError::from(DomainError::InvalidPath(index.to_string())))?;

        self.run.send_modify(|run| run.set_section(&section.title));
        progress.on_section_start(index, &section.title);

        let outlines = self.stages.outline(&section).await?;
        for outline in &outlines {
            if !section.chapters.iter().any(|c| c.title == outline.chapter_title) {
                debug!(
                    "Outline for \"{}\" names unknown chapter \"{}\"",
                    section.title, outline.chapter_title
                );
            }
        }

        for (chapter_index, chapter) in section.chapters.iter().enumerate() {
            let path = NodePath::chapter(index, chapter_index);
            let titles = match ChapterOutline::find(&outlines, &chapter.title) {
                Some(outline) => outline.titles.clone(),
                None => {
                    debug!(
                        "No outline for \"{}\", keeping its {} existing pages",
                        chapter.title,
                        chapter.pages.len()
                    );
                    chapter.page_titles()
                }
            };

            self.run.send_modify(|run| run.set_chapter(&chapter.title));
            let labels = self.run.borrow().progress().clone();
            progress.on_chapter_start(path, &labels);

            let result = write_chapter(
                &self.stages,
                &section.title,
                path,
                &chapter.title,
                &titles,
                progress,
            )
            .await?;

            self.store.merge_chapter(&result)?;
            self.logger.log(ConversationEvent::new(
                "chapter_merged",
                json!({
                    "path": path.to_string(),
                    "chapter": chapter.title,
                    "pages": result.pages.len(),
                }),
            ));
            progress.on_chapter_merged(path, result.pages.len());

            if let Ok(mut merged) = committed.lock() {
                merged.push(result);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationParams, PacingParams};
    use crate::pacing::RetryingCaller;
    use crate::ports::llm_gateway::{GatewayError, GenerationResponse};
    use crate::testing::{CallRecord, ScriptedGateway, respond_as_pipeline};
    use lore_domain::{
        ArchetypeModels, Book, Chapter, GenerationProgress, Model, Page, RunStatus, Section,
    };
    use std::time::Duration;

    fn two_by_two() -> Book {
        Book::new(vec![
            Section::new("Alpha", vec![Chapter::new("A1"), Chapter::new("A2")]),
            Section::new("Beta", vec![Chapter::new("B1"), Chapter::new("B2")]),
        ])
    }

    fn use_case(
        gateway: Arc<ScriptedGateway>,
        book: Book,
        pacing: PacingParams,
        pages_per_chapter: usize,
    ) -> (GenerateBookUseCase<ScriptedGateway>, Arc<DocumentStore>) {
        let caller = Arc::new(RetryingCaller::new(gateway, pacing));
        let params = GenerationParams::default().with_pages_per_chapter(pages_per_chapter);
        let stages = Arc::new(ArchetypeStages::new(caller, params));
        let store = Arc::new(DocumentStore::in_memory(book));
        (GenerateBookUseCase::new(stages, Arc::clone(&store)), store)
    }

    fn fast_pacing() -> PacingParams {
        PacingParams::default()
            .with_min_interval(Duration::from_secs(1))
            .with_cooldown(Duration::from_secs(1))
    }

    fn find<'a>(calls: &'a [CallRecord], model: &Model, needle: &str) -> &'a CallRecord {
        calls
            .iter()
            .find(|c| &c.model == model && c.prompt.contains(needle))
            .unwrap()
    }

    #[derive(Default)]
    struct RecordingProgress {
        merged: Mutex<Vec<NodePath>>,
        sections: Mutex<Vec<String>>,
        final_status: Mutex<Option<RunStatus>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_run_start(&self, _total_sections: usize, _total_chapters: usize) {}

        fn on_section_start(&self, _section_index: usize, title: &str) {
            self.sections.lock().unwrap().push(title.to_string());
        }

        fn on_chapter_start(&self, _path: NodePath, progress: &GenerationProgress) {
            assert!(progress.chapter_label.starts_with("Narrating: "));
        }

        fn on_chapter_merged(&self, path: NodePath, _pages: usize) {
            self.merged.lock().unwrap().push(path);
        }

        fn on_run_complete(&self, run: &GenerationRun) {
            *self.final_status.lock().unwrap() = Some(run.status());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sections_run_concurrently_and_chapters_in_order() {
        let models = ArchetypeModels::default();
        let gateway = Arc::new(
            ScriptedGateway::pipeline(models.clone(), 1)
                .with_latency(models.brains.clone(), Duration::from_secs(5))
                .with_latency(models.serious.clone(), Duration::from_secs(2))
                .with_latency(models.clown.clone(), Duration::from_secs(2)),
        );
        let (use_case, _store) = use_case(Arc::clone(&gateway), two_by_two(), fast_pacing(), 1);
        let progress = RecordingProgress::default();

        let report = use_case.execute_with_progress(&progress).await.unwrap();
        assert_eq!(report.chapters.len(), 4);

        let calls = gateway.calls();
        let alpha = find(&calls, &models.brains, "\"Alpha\"");
        let beta = find(&calls, &models.brains, "\"Beta\"");
        assert!(alpha.started < beta.finished);
        assert!(beta.started < alpha.finished);

        let refine_a1 = find(&calls, &models.clown, "domain \"A1\"");
        let draft_a2 = find(&calls, &models.serious, "domain \"A2\"");
        assert!(draft_a2.started >= refine_a1.finished);

        let refine_b1 = find(&calls, &models.clown, "domain \"B1\"");
        let draft_b2 = find(&calls, &models.serious, "domain \"B2\"");
        assert!(draft_b2.started >= refine_b1.finished);

        assert_eq!(progress.merged.lock().unwrap().len(), 4);
        assert_eq!(progress.sections.lock().unwrap().len(), 2);
        assert_eq!(
            *progress.final_status.lock().unwrap(),
            Some(RunStatus::Completed)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmatched_outline_leaves_pages_empty() {
        let models = ArchetypeModels::default();
        let brains = models.brains.clone();
        let gateway = Arc::new(ScriptedGateway::new(move |request| {
            if request.model == brains {
                Ok(GenerationResponse::Text(
                    r#"{"chapters": [{"chapterTitle": "a1", "titles": ["Lost"]}]}"#.to_string(),
                ))
            } else {
                respond_as_pipeline(&models, 1, request)
            }
        }));
        let (use_case, store) = use_case(Arc::clone(&gateway), two_by_two(), fast_pacing(), 1);

        use_case.execute().await.unwrap();

        let book = store.snapshot();
        assert_eq!(book.page_count(), 0);
        assert_eq!(use_case.run_state().status(), RunStatus::Completed);
        // Only the two outline calls were made
        assert_eq!(gateway.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_starter_book_end_to_end() {
        let gateway = Arc::new(ScriptedGateway::pipeline(ArchetypeModels::default(), 2));
        let (use_case, store) = use_case(gateway, Book::starter(), PacingParams::default(), 2);

        let mut rx = use_case.subscribe();
        let initial = rx.borrow_and_update().status();
        let watcher = async {
            let mut seen = vec![initial];
            while rx.changed().await.is_ok() {
                let status = rx.borrow_and_update().status();
                if seen.last() != Some(&status) {
                    seen.push(status);
                }
                if status.is_terminal() {
                    break;
                }
            }
            seen
        };

        let (report, seen) = tokio::join!(use_case.execute(), watcher);
        let report = report.unwrap();

        assert_eq!(
            seen,
            vec![RunStatus::Idle, RunStatus::Running, RunStatus::Completed]
        );
        assert_eq!(report.chapters.len(), 14);
        assert_eq!(report.page_count(), 28);

        let book = store.snapshot();
        assert_eq!(book.page_count(), 28);
        for (path, page) in book.pages() {
            assert!(!page.content.is_empty(), "page {} has no body", path);
        }
        for section in &book.sections {
            for chapter in &section.chapters {
                assert_eq!(chapter.pages.len(), 2);
            }
        }
        assert!(use_case.run_state().progress().section_label.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_merged_chapters_and_aborts() {
        let models = ArchetypeModels::default();
        let serious = models.serious.clone();
        let gateway = Arc::new(ScriptedGateway::new(move |request| {
            if request.model == serious && request.prompt.contains("domain \"A2\"") {
                Err(GatewayError::RequestFailed("content blocked".to_string()))
            } else {
                respond_as_pipeline(&models, 1, request)
            }
        }));
        let (use_case, store) = use_case(gateway, two_by_two(), fast_pacing(), 1);

        let err = use_case.execute().await.unwrap_err();

        match &err {
            GenerateBookError::Aborted { committed, .. } => assert_eq!(committed.len(), 3),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(
            err.to_string(),
            "Expedition Aborted: Request failed: content blocked"
        );

        let book = store.snapshot();
        assert_eq!(book.chapter(0, 0).unwrap().pages.len(), 1);
        assert!(book.chapter(0, 1).unwrap().pages.is_empty());
        assert_eq!(book.chapter(1, 0).unwrap().pages.len(), 1);
        assert_eq!(book.chapter(1, 1).unwrap().pages.len(), 1);

        let run = use_case.run_state();
        assert_eq!(run.status(), RunStatus::Aborted);
        assert_eq!(
            run.error(),
            Some("Expedition Aborted: Request failed: content blocked")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_run_rejected_while_running() {
        let models = ArchetypeModels::default();
        let gateway = Arc::new(
            ScriptedGateway::pipeline(models.clone(), 1)
                .with_latency(models.brains.clone(), Duration::from_secs(5)),
        );
        let (use_case, _store) = use_case(gateway, two_by_two(), fast_pacing(), 1);

        let (first, second) = tokio::join!(use_case.execute(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            use_case.execute().await
        });

        assert!(first.is_ok());
        assert!(matches!(second, Err(GenerateBookError::AlreadyRunning)));

        // A finished run can be started again
        assert!(use_case.execute().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_run_is_aborted_and_can_restart() {
        let models = ArchetypeModels::default();
        let gateway = Arc::new(
            ScriptedGateway::pipeline(models.clone(), 1)
                .with_latency(models.brains.clone(), Duration::from_secs(5)),
        );
        let (use_case, store) = use_case(gateway, two_by_two(), fast_pacing(), 1);

        let cancelled = tokio::time::timeout(Duration::from_secs(3), use_case.execute()).await;
        assert!(cancelled.is_err());

        let run = use_case.run_state();
        assert_eq!(run.status(), RunStatus::Aborted);
        assert!(run.error().unwrap().starts_with("Expedition Aborted"));
        assert_eq!(store.snapshot().page_count(), 0);

        let report = use_case.execute().await.unwrap();
        assert_eq!(report.chapters.len(), 4);
        assert_eq!(use_case.run_state().status(), RunStatus::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chapter_merge_replaces_concurrent_page_edits() {
        let models = ArchetypeModels::default();
        let gateway = Arc::new(
            ScriptedGateway::pipeline(models.clone(), 1)
                .with_latency(models.brains.clone(), Duration::from_secs(5))
                .with_latency(models.serious.clone(), Duration::from_secs(10))
                .with_latency(models.clown.clone(), Duration::from_secs(2)),
        );
        let book = Book::new(vec![Section::new(
            "Alpha",
            vec![
                Chapter::new("A1").with_pages(vec![Page::titled("A1 objective 1")]),
                Chapter::new("A2"),
            ],
        )]);
        let (use_case, store) = use_case(gateway, book, fast_pacing(), 1);
        let first_page = NodePath::page(0, 0, 0);

        let (report, _) = tokio::join!(use_case.execute(), async {
            // A1 is being drafted
            tokio::time::sleep(Duration::from_secs(8)).await;
            store.set_page_content(first_page, "Hand edit").unwrap();
            assert_eq!(store.snapshot().page(0, 0, 0).unwrap().content, "Hand edit");

            // A1 is merged, A2 is still being drafted
            tokio::time::sleep(Duration::from_secs(14)).await;
            let merged = store.snapshot().page(0, 0, 0).unwrap().content.clone();
            assert!(merged.starts_with("Refined: "), "unexpected body {}", merged);
            store.set_page_content(first_page, "Second edit").unwrap();
        });
        assert_eq!(report.unwrap().chapters.len(), 2);

        // The merge of A2 leaves the earlier chapter alone
        let book = store.snapshot();
        assert_eq!(book.page(0, 0, 0).unwrap().content, "Second edit");
        assert_eq!(book.chapter(0, 1).unwrap().pages.len(), 1);
    }
}
