//! Static HTML rendering of the whole book

use lore_application::{BookExporter, ExportError};
use lore_domain::Book;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const EMPTY_PAGE: &str = "Awaiting transmission...";

const STYLE: &str = "body{font-family:Georgia,serif;max-width:48rem;margin:2rem auto;\
line-height:1.6;color:#1b2733}h1{text-align:center}h2{border-bottom:2px solid #7aa7c7}\
.empty{color:#8795a1;font-style:italic}";

/// [`BookExporter`] writing one self-contained HTML file
pub struct HtmlBookExporter {
    dir: PathBuf,
    file_stem: String,
    title: String,
}

impl HtmlBookExporter {
    pub fn new(dir: impl AsRef<Path>, file_stem: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            file_stem: file_stem.into(),
            title: "Ice Wall Expedition Log".to_string(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn target(&self) -> PathBuf {
        self.dir.join(format!("{}.html", self.file_stem))
    }

    /// Render the document in reading order
    pub fn render(&self, book: &Book) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<!DOCTYPE html>");
        let _ = writeln!(out, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">");
        let _ = writeln!(out, "<title>{}</title>", escape(&self.title));
        let _ = writeln!(out, "<style>{}</style>\n</head>\n<body>", STYLE);
        let _ = writeln!(out, "<h1>{}</h1>", escape(&self.title));

        for section in &book.sections {
            let _ = writeln!(out, "<section>\n<h2>{}</h2>", escape(&section.title));
            for chapter in &section.chapters {
                let _ = writeln!(out, "<h3>{}</h3>", escape(&chapter.title));
                for page in &chapter.pages {
                    let _ = writeln!(out, "<article>\n<h4>{}</h4>", escape(&page.title));
                    if page.is_empty() {
                        let _ = writeln!(out, "<p class=\"empty\">{}</p>", EMPTY_PAGE);
                    } else {
                        for paragraph in paragraphs(&page.content) {
                            let _ = writeln!(out, "<p>{}</p>", escape(paragraph));
                        }
                    }
                    let _ = writeln!(out, "</article>");
                }
            }
            let _ = writeln!(out, "</section>");
        }

        let _ = writeln!(out, "</body>\n</html>");
        out
    }
}

impl BookExporter for HtmlBookExporter {
    fn export(&self, book: &Book) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)?;
        let target = self.target();
        fs::write(&target, self.render(book))?;
        info!("Exported {} pages to {}", book.page_count(), target.display());
        Ok(target)
    }
}

fn paragraphs(content: &str) -> impl Iterator<Item = &str> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_domain::{Chapter, Page, Section};

    fn sample() -> Book {
        Book::new(vec![
            Section::new(
                "I. The Approach",
                vec![Chapter::new("Runes").with_pages(vec![
                    Page::new("First Glyph", "Carved <deep> & old.\n\nStill warm."),
                    Page::titled("Second Glyph"),
                ])],
            ),
            Section::new("II. The Wall", vec![Chapter::new("Frost")]),
        ])
    }

    #[test]
    fn test_titles_in_reading_order() {
        let html = HtmlBookExporter::new("/tmp", "log").render(&sample());
        let positions: Vec<usize> = [
            "I. The Approach",
            "Runes",
            "First Glyph",
            "Second Glyph",
            "II. The Wall",
            "Frost",
        ]
        .iter()
        .map(|title| html.find(title).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_markup_is_escaped() {
        let html = HtmlBookExporter::new("/tmp", "log").render(&sample());
        assert!(html.contains("<p>Carved &lt;deep&gt; &amp; old.</p>"));
        assert!(html.contains("<p>Still warm.</p>"));
        assert!(!html.contains("<deep>"));
    }

    #[test]
    fn test_empty_page_placeholder() {
        let html = HtmlBookExporter::new("/tmp", "log").render(&sample());
        assert_eq!(html.matches(EMPTY_PAGE).count(), 1);
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter =
            HtmlBookExporter::new(dir.path().join("out"), "expedition").with_title("Field Notes");

        let path = exporter.export(&sample()).unwrap();

        assert_eq!(path, dir.path().join("out").join("expedition.html"));
        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("<title>Field Notes</title>"));
        assert!(html.ends_with("</html>\n"));
    }
}
