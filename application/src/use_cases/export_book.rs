//! Export Book use case

use crate::ports::book_exporter::{BookExporter, ExportError};
use crate::store::DocumentStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct ExportBookUseCase {
    store: Arc<DocumentStore>,
    exporter: Arc<dyn BookExporter>,
}

impl ExportBookUseCase {
    pub fn new(store: Arc<DocumentStore>, exporter: Arc<dyn BookExporter>) -> Self {
        Self { store, exporter }
    }

    /// Export the current snapshot
    pub fn execute(&self) -> Result<PathBuf, ExportError> {
        let book = self.store.snapshot();
        let path = self.exporter.export(&book)?;
        info!("Exported {} pages to {}", book.page_count(), path.display());
        Ok(path)
    }
}
