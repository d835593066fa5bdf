//! Book export port

use lore_domain::Book;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders the whole tree into a single static document
pub trait BookExporter: Send + Sync {
    /// Write the document and return where it went
    fn export(&self, book: &Book) -> Result<PathBuf, ExportError>;
}
