//! Progress notification port
//!
//! Defines the interface for reporting progress during a generation run.

use lore_domain::{GenerationProgress, GenerationRun, NodePath};

/// Callback for progress updates during a generation run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain log lines, etc.)
///
/// Sections are processed concurrently, so calls for different sections
/// interleave. Calls for one section arrive in order.
pub trait ProgressNotifier: Send + Sync {
    /// Called once when the run starts
    fn on_run_start(&self, total_sections: usize, total_chapters: usize);

    /// Called when a section's outline call is about to be issued
    fn on_section_start(&self, section_index: usize, title: &str);

    /// Called before the first draft call of a chapter
    fn on_chapter_start(&self, path: NodePath, progress: &GenerationProgress);

    /// Called after a page has been drafted and refined
    fn on_page_complete(&self, _path: NodePath, _title: &str) {}

    /// Called after a chapter has been merged into the document store
    fn on_chapter_merged(&self, path: NodePath, pages: usize);

    /// Called once with the final run state
    fn on_run_complete(&self, run: &GenerationRun);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_run_start(&self, _total_sections: usize, _total_chapters: usize) {}
    fn on_section_start(&self, _section_index: usize, _title: &str) {}
    fn on_chapter_start(&self, _path: NodePath, _progress: &GenerationProgress) {}
    fn on_chapter_merged(&self, _path: NodePath, _pages: usize) {}
    fn on_run_complete(&self, _run: &GenerationRun) {}
}
