//! Generation value objects - immutable results of each stage.
//!
//! - [`ChapterOutline`] - page titles the outline stage proposed for one chapter
//! - [`PageDraft`] - draft and refined text for one page
//! - [`ChapterResult`] - every page of one chapter after draft and refinement
//! - [`AudioClip`] - decoded narration audio

use crate::book::{Chapter, Page};
use serde::{Deserialize, Serialize};

/// Page titles proposed for one chapter by the outline stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterOutline {
    pub chapter_title: String,
    #[serde(default)]
    pub titles: Vec<String>,
}

impl ChapterOutline {
    pub fn new(chapter_title: impl Into<String>, titles: Vec<String>) -> Self {
        Self {
            chapter_title: chapter_title.into(),
            titles,
        }
    }

    /// Find the outline for a chapter by exact title match.
    ///
    /// The first matching record wins; near-misses (case, whitespace) do not match.
    pub fn find<'a>(outlines: &'a [ChapterOutline], chapter_title: &str) -> Option<&'a Self> {
        outlines.iter().find(|o| o.chapter_title == chapter_title)
    }

    /// Fresh pages with empty bodies, one per proposed title
    pub fn to_pages(&self) -> Vec<Page> {
        self.titles.iter().map(Page::titled).collect()
    }
}

/// One page after the draft and refinement stages.
///
/// Both texts are kept: refinement is free to restyle the draft and nothing
/// checks that the action survived, so callers can compare them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDraft {
    pub title: String,
    pub draft: String,
    pub refined: String,
}

impl PageDraft {
    pub fn new(
        title: impl Into<String>,
        draft: impl Into<String>,
        refined: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            draft: draft.into(),
            refined: refined.into(),
        }
    }

    /// The page as it is merged into the book
    pub fn to_page(&self) -> Page {
        Page::new(self.title.clone(), self.refined.clone())
    }
}

/// Every page of a chapter after generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterResult {
    pub section_index: usize,
    pub chapter_index: usize,
    pub chapter_title: String,
    pub pages: Vec<PageDraft>,
}

impl ChapterResult {
    /// The chapter subtree that replaces the stored one
    pub fn to_chapter(&self) -> Chapter {
        Chapter::new(self.chapter_title.clone())
            .with_pages(self.pages.iter().map(PageDraft::to_page).collect())
    }
}

/// Decoded narration audio (mono float samples in `[-1, 1]`)
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioClip {
    /// Sample rate of the speech model output
    pub const SPEECH_SAMPLE_RATE: u32 = 24_000;

    /// Build a mono 24 kHz clip from signed 16-bit little-endian PCM bytes.
    ///
    /// A trailing odd byte is ignored.
    pub fn from_pcm16_le(bytes: &[u8]) -> Self {
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| f32::from(i16::from_le_bytes([pair[0], pair[1]])) / 32768.0)
            .collect();
        Self {
            samples,
            sample_rate: Self::SPEECH_SAMPLE_RATE,
            channels: 1,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / (self.sample_rate as f32 * f32::from(self.channels))
    }
}
