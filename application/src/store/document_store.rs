//! Document store: the single live copy of the book.
//!
//! The current tree is an `Arc<Book>` published through a
//! [`tokio::sync::watch`] channel. Mutations build a new tree from the
//! current one and publish it in one step, so a reader sees either the old
//! tree or the new one and never a half-written chapter. Concurrent writers
//! are serialized by the channel; the last one wins.
//!
//! Every successful mutation is saved through the [`BookRepository`].
//! A failed save is logged and does not undo the mutation.

use crate::ports::book_repository::{BookRepository, InMemoryBookRepository, RepositoryError};
use lore_domain::{Book, Chapter, ChapterResult, DomainError, NodePath};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Errors from the document store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub struct DocumentStore {
    sender: watch::Sender<Arc<Book>>,
    repository: Arc<dyn BookRepository>,
}

impl DocumentStore {
    pub fn new(book: Book, repository: Arc<dyn BookRepository>) -> Self {
        let (sender, _) = watch::channel(Arc::new(book));
        Self { sender, repository }
    }

    /// Store backed by nothing but memory
    pub fn in_memory(book: Book) -> Self {
        Self::new(book, Arc::new(InMemoryBookRepository::new()))
    }

    /// Load the saved tree, or start from [`Book::starter`] if nothing was saved.
    pub fn open(repository: Arc<dyn BookRepository>) -> Result<Self, StoreError> {
        let book = match repository.load()? {
            Some(book) => {
                debug!(
                    "Restored book: {} sections, {} pages",
                    book.sections.len(),
                    book.page_count()
                );
                book
            }
            None => {
                info!("No saved book found, starting from the built-in tree");
                Book::starter()
            }
        };
        Ok(Self::new(book, repository))
    }

    /// The current tree
    pub fn snapshot(&self) -> Arc<Book> {
        Arc::clone(&self.sender.borrow())
    }

    /// Receiver notified on every published tree
    pub fn subscribe(&self) -> watch::Receiver<Arc<Book>> {
        self.sender.subscribe()
    }

    /// Replace the chapter a generation result belongs to
    pub fn merge_chapter(&self, result: &ChapterResult) -> Result<Arc<Book>, StoreError> {
        self.replace_chapter(result.section_index, result.chapter_index, result.to_chapter())
    }

    pub fn replace_chapter(
        &self,
        section: usize,
        chapter: usize,
        replacement: Chapter,
    ) -> Result<Arc<Book>, StoreError> {
        self.update(|book| book.with_chapter(section, chapter, replacement))
    }

    /// Overwrite one page body. `path` must address a page.
    pub fn set_page_content(
        &self,
        path: NodePath,
        content: impl Into<String>,
    ) -> Result<Arc<Book>, StoreError> {
        let page = path
            .page
            .ok_or_else(|| DomainError::InvalidPath(path.to_string()))?;
        let content = content.into();
        self.update(|book| book.with_page_content(path.section, path.chapter, page, content))
    }

    /// Publish a whole new tree
    pub fn replace(&self, book: Book) -> Arc<Book> {
        let book = Arc::new(book);
        self.sender.send_replace(Arc::clone(&book));
        self.persist(&book);
        book
    }

    /// Go back to the built-in tree
    pub fn reset(&self) -> Arc<Book> {
        info!("Resetting book to the built-in tree");
        self.replace(Book::starter())
    }

    fn update(
        &self,
        mutate: impl FnOnce(&Book) -> Result<Book, DomainError>,
    ) -> Result<Arc<Book>, StoreError> {
        let mut outcome = None;
        self.sender.send_if_modified(|current| match mutate(&**current) {
            Ok(next) => {
                let next = Arc::new(next);
                *current = Arc::clone(&next);
                outcome = Some(Ok(next));
                true
            }
            Err(e) => {
                outcome = Some(Err(e));
                false
            }
        });

        let book = outcome.unwrap_or_else(|| Ok(self.snapshot()))?;
        self.persist(&book);
        Ok(book)
    }

    /// Save through the repository on the caller's thread.
    ///
    /// The file repository does a blocking write and rename, which the
    /// single-user CLI tolerates. A store shared with a server should move
    /// this behind `tokio::task::spawn_blocking`.
    fn persist(&self, book: &Book) {
        if let Err(e) = self.repository.save(book) {
            warn!("Failed to save book: {}", e);
        }
    }
}
