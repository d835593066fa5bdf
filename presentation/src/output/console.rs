//! Console output formatter for the book and generation results

use colored::Colorize;
use lore_application::RunReport;
use lore_domain::{Book, Chapter, GenerationRun, NodePath, Page, RunStatus};

/// Formats the book and run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Outline of the whole book with a fill marker per page
    pub fn format_tree(book: &Book) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Ice Wall Expedition"));
        output.push('\n');

        for (s, section) in book.sections.iter().enumerate() {
            output.push_str(&format!("\n{}\n", section.title.cyan().bold()));
            for (c, chapter) in section.chapters.iter().enumerate() {
                output.push_str(&format!(
                    "  {} {} {}\n",
                    format!("[{}]", NodePath::chapter(s, c)).dimmed(),
                    chapter.title.yellow().bold(),
                    Self::fill_summary(chapter)
                ));
                for (p, page) in chapter.pages.iter().enumerate() {
                    let marker = if page.is_empty() {
                        "o".dimmed()
                    } else {
                        "*".green()
                    };
                    output.push_str(&format!(
                        "    {} {} {}\n",
                        marker,
                        format!("[{}]", NodePath::page(s, c, p)).dimmed(),
                        page.title
                    ));
                }
            }
        }

        output.push_str(&format!(
            "\n{} {}/{} pages written\n",
            "Progress:".cyan().bold(),
            book.pages().filter(|(_, page)| !page.is_empty()).count(),
            book.page_count()
        ));
        output
    }

    /// One chapter, or one page with its body
    pub fn format_node(chapter: &Chapter, page: Option<&Page>) -> String {
        match page {
            Some(page) => Self::format_page(chapter, page),
            None => {
                let mut output = Self::section_header(&chapter.title);
                if chapter.pages.is_empty() {
                    output.push_str(&format!("{}\n", "No pages planned yet.".dimmed()));
                }
                for page in &chapter.pages {
                    output.push_str(&format!("\n{}\n", page.title.yellow().bold()));
                    output.push_str(&Self::body(page));
                }
                output
            }
        }
    }

    fn format_page(chapter: &Chapter, page: &Page) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", chapter.title.dimmed()));
        output.push_str(&Self::section_header(&page.title));
        output.push_str(&Self::body(page));
        output
    }

    fn body(page: &Page) -> String {
        if page.is_empty() {
            format!("{}\n", "Awaiting transmission...".dimmed().italic())
        } else {
            format!("{}\n", Self::indent(&page.content, "  "))
        }
    }

    /// Summary of a finished run
    pub fn format_run(run: &GenerationRun, report: Option<&RunReport>) -> String {
        let mut output = String::new();

        let status = match run.status() {
            RunStatus::Completed => "Expedition complete".green().bold(),
            RunStatus::Aborted => "Expedition Aborted".red().bold(),
            other => other.as_str().normal(),
        };
        output.push_str(&format!("\n{}\n", status));

        if let Some(report) = report {
            output.push_str(&format!(
                "{} {} chapters, {} pages\n",
                "Written:".cyan().bold(),
                report.chapters.len(),
                report.page_count()
            ));
            for chapter in &report.chapters {
                output.push_str(&format!(
                    "  {} {} {}\n",
                    "v".green(),
                    format!(
                        "[{}]",
                        NodePath::chapter(chapter.section_index, chapter.chapter_index)
                    )
                    .dimmed(),
                    chapter.chapter_title
                ));
            }
        }

        if let Some(error) = run.error() {
            output.push_str(&format!("{} {}\n", "Error:".red().bold(), error));
        }
        output
    }

    /// Raw JSON of the tree, as stored
    pub fn format_json(book: &Book) -> String {
        serde_json::to_string_pretty(book).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    fn fill_summary(chapter: &Chapter) -> String {
        let filled = chapter.pages.iter().filter(|p| !p.is_empty()).count();
        let summary = format!("({}/{})", filled, chapter.pages.len());
        if chapter.pages.is_empty() {
            summary.dimmed().to_string()
        } else if filled == chapter.pages.len() {
            summary.green().to_string()
        } else {
            summary.yellow().to_string()
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
