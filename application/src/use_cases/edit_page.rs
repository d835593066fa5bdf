//! Edit Page use case
//!
//! Hand edits go through the same store as generation merges. A run that
//! later merges the page's chapter overwrites the edit.

use crate::store::{DocumentStore, StoreError};
use lore_domain::{Book, NodePath};
use std::sync::Arc;
use tracing::debug;

pub struct EditPageUseCase {
    store: Arc<DocumentStore>,
}

impl EditPageUseCase {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Replace the body of the page at `path`, keeping its title
    pub fn execute(
        &self,
        path: NodePath,
        content: impl Into<String>,
    ) -> Result<Arc<Book>, StoreError> {
        let content = content.into();
        debug!("Editing page {} ({} chars)", path, content.chars().count());
        self.store.set_page_content(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_domain::{Chapter, Page, Section};

    #[test]
    fn test_edit_replaces_body_only() {
        let book = Book::new(vec![Section::new(
            "North",
            vec![Chapter::new("Ridge").with_pages(vec![Page::new("Camp", "cold")])],
        )]);
        let store = Arc::new(DocumentStore::in_memory(book));
        let use_case = EditPageUseCase::new(Arc::clone(&store));

        use_case.execute(NodePath::page(0, 0, 0), "warmer").unwrap();

        let page = store.snapshot().page(0, 0, 0).cloned().unwrap();
        assert_eq!(page, Page::new("Camp", "warmer"));
    }

    #[test]
    fn test_edit_missing_page() {
        let store = Arc::new(DocumentStore::in_memory(Book::starter()));
        let use_case = EditPageUseCase::new(store);
        assert!(use_case.execute(NodePath::page(0, 0, 0), "x").is_err());
    }
}
