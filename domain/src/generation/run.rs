//! Generation run state (Entity)
//!
//! One run walks the whole book. It starts `Idle`, moves to `Running`, and
//! ends `Completed` or `Aborted`. There is no pause and no user cancel.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Aborted,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Aborted => "aborted",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RunStatus::Running)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Aborted)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Labels for what a run is currently working on
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationProgress {
    pub section_label: String,
    pub chapter_label: String,
}

impl GenerationProgress {
    pub fn section_label_for(title: &str) -> String {
        format!("Architecting: {}", title)
    }

    pub fn chapter_label_for(title: &str) -> String {
        format!("Narrating: {}", title)
    }

    /// Single-line form used by overlays and spinners
    pub fn headline(&self) -> String {
        match (self.section_label.is_empty(), self.chapter_label.is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.section_label.clone(),
            (true, false) => self.chapter_label.clone(),
            (false, false) => format!("{} — {}", self.section_label, self.chapter_label),
        }
    }
}

/// Represents one orchestration run (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationRun {
    status: RunStatus,
    progress: GenerationProgress,
    error: Option<String>,
}

impl GenerationRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn progress(&self) -> &GenerationProgress {
        &self.progress
    }

    /// Abort message of the last failed run, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// `Idle | Completed | Aborted → Running`. Clears labels and the previous error.
    pub fn start(&mut self) -> Result<(), DomainError> {
        if self.status == RunStatus::Running {
            return Err(self.invalid(RunStatus::Running));
        }
        self.status = RunStatus::Running;
        self.progress = GenerationProgress::default();
        self.error = None;
        Ok(())
    }

    /// `Running → Completed`
    pub fn complete(&mut self) -> Result<(), DomainError> {
        if self.status != RunStatus::Running {
            return Err(self.invalid(RunStatus::Completed));
        }
        self.status = RunStatus::Completed;
        self.progress = GenerationProgress::default();
        Ok(())
    }

    /// `Running → Aborted`, keeping the message for display
    pub fn abort(&mut self, message: impl Into<String>) -> Result<(), DomainError> {
        if self.status != RunStatus::Running {
            return Err(self.invalid(RunStatus::Aborted));
        }
        self.status = RunStatus::Aborted;
        self.progress = GenerationProgress::default();
        self.error = Some(message.into());
        Ok(())
    }

    pub fn set_section(&mut self, title: &str) {
        self.progress.section_label = GenerationProgress::section_label_for(title);
    }

    pub fn set_chapter(&mut self, title: &str) {
        self.progress.chapter_label = GenerationProgress::chapter_label_for(title);
    }

    fn invalid(&self, to: RunStatus) -> DomainError {
        DomainError::InvalidTransition {
            from: self.status.to_string(),
            to: to.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut run = GenerationRun::new();
        assert_eq!(run.status(), RunStatus::Idle);

        run.start().unwrap();
        assert!(run.is_active());
        run.set_section("The Great Barrier");
        run.set_chapter("Escaping the Thaw");
        assert_eq!(
            run.progress().headline(),
            "Architecting: The Great Barrier — Narrating: Escaping the Thaw"
        );

        run.complete().unwrap();
        assert_eq!(run.status(), RunStatus::Completed);
        assert!(run.progress().headline().is_empty());
    }

    #[test]
    fn test_abort_keeps_message_until_next_start() {
        let mut run = GenerationRun::new();
        run.start().unwrap();
        run.abort("Expedition Aborted: boom").unwrap();
        assert_eq!(run.status(), RunStatus::Aborted);
        assert_eq!(run.error(), Some("Expedition Aborted: boom"));

        run.start().unwrap();
        assert!(run.error().is_none());
    }

    #[test]
    fn test_illegal_transitions() {
        let mut run = GenerationRun::new();
        assert!(run.complete().is_err());
        assert!(run.abort("x").is_err());

        run.start().unwrap();
        assert!(matches!(
            run.start(),
            Err(DomainError::InvalidTransition { from, to }) if from == "running" && to == "running"
        ));

        run.complete().unwrap();
        assert!(run.complete().is_err());
        assert!(run.abort("late").is_err());
    }

    #[test]
    fn test_status_flags() {
        assert!(RunStatus::Running.is_active());
        assert!(!RunStatus::Idle.is_terminal());
        assert!(RunStatus::Aborted.is_terminal());
    }
}
