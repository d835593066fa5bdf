//! Book tree entities
//!
//! The tree is a plain value. Every mutation helper here takes `&self` and
//! returns a new [`Book`], so a published snapshot is never written to.

use super::path::NodePath;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Leaf node: a titled page of generated or hand-written text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Page {
    /// A page with a title and an empty body, as produced by outline planning
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
        }
    }

    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Second-level node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Chapter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
        }
    }

    pub fn with_pages(mut self, pages: Vec<Page>) -> Self {
        self.pages = pages;
        self
    }

    pub fn page_titles(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.title.clone()).collect()
    }
}

/// Top-level collection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Section {
    pub fn new(title: impl Into<String>, chapters: Vec<Chapter>) -> Self {
        Self {
            title: title.into(),
            chapters,
        }
    }

    pub fn chapter_titles(&self) -> Vec<String> {
        self.chapters.iter().map(|c| c.title.clone()).collect()
    }
}

/// The whole document tree (Entity)
///
/// Serializes as a bare JSON array of sections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Book {
    pub sections: Vec<Section>,
}

impl Book {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn chapter(&self, section: usize, chapter: usize) -> Option<&Chapter> {
        self.section(section)?.chapters.get(chapter)
    }

    pub fn page(&self, section: usize, chapter: usize, page: usize) -> Option<&Page> {
        self.chapter(section, chapter)?.pages.get(page)
    }

    /// Resolve a path to its chapter, failing if any index is out of range.
    ///
    /// A page index, when present, must also resolve.
    pub fn resolve(&self, path: &NodePath) -> Result<(&Chapter, Option<&Page>), DomainError> {
        let chapter = self
            .chapter(path.section, path.chapter)
            .ok_or_else(|| DomainError::InvalidPath(path.to_string()))?;
        match path.page {
            None => Ok((chapter, None)),
            Some(p) => chapter
                .pages
                .get(p)
                .map(|page| (chapter, Some(page)))
                .ok_or_else(|| DomainError::InvalidPath(path.to_string())),
        }
    }

    /// Copy-on-write replacement of one chapter subtree.
    pub fn with_chapter(
        &self,
        section: usize,
        chapter: usize,
        replacement: Chapter,
    ) -> Result<Book, DomainError> {
        if self.chapter(section, chapter).is_none() {
            return Err(DomainError::InvalidPath(
                NodePath::chapter(section, chapter).to_string(),
            ));
        }
        let mut next = self.clone();
        next.sections[section].chapters[chapter] = replacement;
        Ok(next)
    }

    /// Copy-on-write replacement of one page body. The title is kept.
    pub fn with_page_content(
        &self,
        section: usize,
        chapter: usize,
        page: usize,
        content: impl Into<String>,
    ) -> Result<Book, DomainError> {
        if self.page(section, chapter, page).is_none() {
            return Err(DomainError::InvalidPath(
                NodePath::page(section, chapter, page).to_string(),
            ));
        }
        let mut next = self.clone();
        next.sections[section].chapters[chapter].pages[page].content = content.into();
        Ok(next)
    }

    pub fn page_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.chapters)
            .map(|c| c.pages.len())
            .sum()
    }

    pub fn chapter_count(&self) -> usize {
        self.sections.iter().map(|s| s.chapters.len()).sum()
    }

    /// Iterate pages in reading order together with their paths
    pub fn pages(&self) -> impl Iterator<Item = (NodePath, &Page)> {
        self.sections.iter().enumerate().flat_map(|(s, section)| {
            section.chapters.iter().enumerate().flat_map(move |(c, chapter)| {
                chapter
                    .pages
                    .iter()
                    .enumerate()
                    .map(move |(p, page)| (NodePath::page(s, c, p), page))
            })
        })
    }
}
