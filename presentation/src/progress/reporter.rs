//! Progress reporting for generation runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use lore_application::ProgressNotifier;
use lore_domain::{GenerationProgress, GenerationRun, NodePath, RunStatus};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per section and an overall chapter bar
pub struct ProgressReporter {
    multi: MultiProgress,
    sections: Mutex<HashMap<usize, ProgressBar>>,
    chapters: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            sections: Mutex::new(HashMap::new()),
            chapters: Mutex::new(None),
        }
    }

    fn chapters_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} chapters {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_section(&self, index: usize, f: impl FnOnce(&ProgressBar)) {
        if let Ok(sections) = self.sections.lock()
            && let Some(bar) = sections.get(&index)
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_run_start(&self, _total_sections: usize, total_chapters: usize) {
        let bar = self.multi.add(ProgressBar::new(total_chapters as u64));
        bar.set_style(Self::chapters_style());
        bar.set_prefix("Expedition");
        if let Ok(mut chapters) = self.chapters.lock() {
            *chapters = Some(bar);
        }
    }

    fn on_section_start(&self, section_index: usize, title: &str) {
        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix(title.to_string());
        spinner.set_message(GenerationProgress::section_label_for(title));
        spinner.enable_steady_tick(Duration::from_millis(120));
        if let Ok(mut sections) = self.sections.lock() {
            sections.insert(section_index, spinner);
        }
    }

    fn on_chapter_start(&self, path: NodePath, progress: &GenerationProgress) {
        self.with_section(path.section, |bar| {
            bar.set_message(progress.chapter_label.clone());
        });
    }

    fn on_page_complete(&self, path: NodePath, title: &str) {
        self.with_section(path.section, |bar| {
            bar.set_message(format!("{} {}", "v".green(), title));
        });
    }

    fn on_chapter_merged(&self, _path: NodePath, _pages: usize) {
        if let Ok(chapters) = self.chapters.lock()
            && let Some(bar) = chapters.as_ref()
        {
            bar.inc(1);
        }
    }

    fn on_run_complete(&self, run: &GenerationRun) {
        let aborted = run.status() == RunStatus::Aborted;
        if let Ok(mut sections) = self.sections.lock() {
            for (_, bar) in sections.drain() {
                if aborted {
                    bar.abandon_with_message("stopped".red().to_string());
                } else {
                    bar.finish_with_message("done".green().to_string());
                }
            }
        }
        if let Ok(mut chapters) = self.chapters.lock()
            && let Some(bar) = chapters.take()
        {
            if aborted {
                bar.abandon();
            } else {
                bar.finish();
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_run_start(&self, total_sections: usize, total_chapters: usize) {
        println!(
            "{} {} ({} sections, {} chapters)",
            "->".cyan(),
            "Expedition launched".bold(),
            total_sections,
            total_chapters
        );
    }

    fn on_section_start(&self, _section_index: usize, title: &str) {
        println!("{} {}", "->".cyan(), GenerationProgress::section_label_for(title));
    }

    fn on_chapter_start(&self, path: NodePath, progress: &GenerationProgress) {
        println!("  [{}] {}", path, progress.chapter_label);
    }

    fn on_chapter_merged(&self, path: NodePath, pages: usize) {
        println!("  {} [{}] {} pages", "v".green(), path, pages);
    }

    fn on_run_complete(&self, run: &GenerationRun) {
        match run.error() {
            Some(error) => println!("{} {}", "x".red(), error),
            None => println!("{} {}", "v".green(), run.status()),
        }
    }
}
