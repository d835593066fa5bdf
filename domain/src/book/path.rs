//! Positional node addressing (`section-chapter[-page]`)

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path to a chapter or page inside a [`Book`](super::Book).
///
/// Indices are positional. A path without a page selects the chapter as a
/// whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePath {
    pub section: usize,
    pub chapter: usize,
    pub page: Option<usize>,
}

impl NodePath {
    pub fn chapter(section: usize, chapter: usize) -> Self {
        Self {
            section,
            chapter,
            page: None,
        }
    }

    pub fn page(section: usize, chapter: usize, page: usize) -> Self {
        Self {
            section,
            chapter,
            page: Some(page),
        }
    }

    /// The enclosing chapter path
    pub fn to_chapter(self) -> Self {
        Self::chapter(self.section, self.chapter)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "{}-{}-{}", self.section, self.chapter, page),
            None => write!(f, "{}-{}", self.section, self.chapter),
        }
    }
}

impl FromStr for NodePath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidPath(s.to_string());
        let indices = s
            .trim()
            .split('-')
            .map(|part| part.parse::<usize>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        match indices.as_slice() {
            [section, chapter] => Ok(Self::chapter(*section, *chapter)),
            [section, chapter, page] => Ok(Self::page(*section, *chapter, *page)),
            _ => Err(invalid()),
        }
    }
}
