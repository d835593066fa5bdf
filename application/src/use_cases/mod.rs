//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod edit_page;
pub mod export_book;
pub mod generate_book;
pub mod generate_chapter;
pub mod narrate_page;
pub(crate) mod shared;
pub mod stages;

pub use shared::GenerationFailure;
