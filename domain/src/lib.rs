//! Domain layer for lore-forge
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Book
//!
//! A fixed three-level tree: sections contain chapters, chapters contain
//! pages. Nodes are addressed by position ([`NodePath`]) and the tree is
//! only ever replaced, never edited in place.
//!
//! ## Archetypes
//!
//! Four fixed generation roles, each bound to its own model:
//!
//! - **Brains**: outline planning (page titles per chapter)
//! - **Serious**: action drafting (one draft per page)
//! - **Clown**: ensemble refinement (banter wrapped around the draft)
//! - **Dreamer**: narration (speech audio for a page)
//!
//! ## Generation Run
//!
//! One run fills the whole book: `Idle → Running → {Completed, Aborted}`.

pub mod book;
pub mod core;
pub mod generation;
pub mod prompt;

// Re-export commonly used types
pub use book::{Book, Chapter, NodePath, Page, Section};
pub use core::{error::DomainError, model::Model};
pub use generation::{
    archetype::{Archetype, ArchetypeModels},
    parsing::parse_outline_response,
    run::{GenerationProgress, GenerationRun, RunStatus},
    value_objects::{AudioClip, ChapterOutline, ChapterResult, PageDraft},
};
pub use prompt::{NARRATION_LEAD_IN, PromptTemplate};
