//! Book domain
//!
//! The document tree (sections → chapters → pages), positional paths into
//! it, and the built-in starter tree.

pub mod entities;
pub mod path;
mod starter;

pub use entities::{Book, Chapter, Page, Section};
pub use path::NodePath;
