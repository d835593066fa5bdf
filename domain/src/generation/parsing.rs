//! Outline response parsing.
//!
//! The outline stage asks for schema-validated JSON, but the text still
//! arrives as a string. These functions turn it into [`ChapterOutline`]
//! records. Pure domain logic, no I/O.

use super::value_objects::ChapterOutline;
use crate::core::error::DomainError;
use serde::Deserialize;

#[derive(Deserialize)]
struct OutlineEnvelope {
    #[serde(default)]
    chapters: Vec<ChapterOutline>,
}

/// Parse an outline response of the form
/// `{"chapters": [{"chapterTitle": "...", "titles": ["..."]}]}`.
///
/// Surrounding whitespace and a Markdown code fence are tolerated. A bare
/// array of records is accepted as well. Anything else is
/// [`DomainError::MalformedOutline`].
pub fn parse_outline_response(response: &str) -> Result<Vec<ChapterOutline>, DomainError> {
    let body = strip_code_fence(response.trim());

    if let Ok(envelope) = serde_json::from_str::<OutlineEnvelope>(body) {
        return Ok(envelope.chapters);
    }

    serde_json::from_str::<Vec<ChapterOutline>>(body).map_err(|e| {
        let preview: String = body.chars().take(120).collect();
        DomainError::MalformedOutline(format!("{} (response starts with: {:?})", e, preview))
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an optional language tag on the opening fence line
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
