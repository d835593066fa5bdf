//! Book persistence port
//!
//! The whole tree is stored in one durable slot. Adapters decide where.

use lore_domain::Book;
use std::sync::Mutex;
use thiserror::Error;

/// Errors from a book repository
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored book is corrupt: {0}")]
    Corrupt(String),
}

/// Durable storage for the book tree
pub trait BookRepository: Send + Sync {
    /// Load the saved tree, `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<Book>, RepositoryError>;

    /// Overwrite the saved tree
    fn save(&self, book: &Book) -> Result<(), RepositoryError>;
}

/// Repository that keeps the last saved tree in memory only
#[derive(Default)]
pub struct InMemoryBookRepository {
    saved: Mutex<Option<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_book(book: Book) -> Self {
        Self {
            saved: Mutex::new(Some(book)),
        }
    }
}

impl BookRepository for InMemoryBookRepository {
    fn load(&self) -> Result<Option<Book>, RepositoryError> {
        Ok(self.saved.lock().map(|b| b.clone()).unwrap_or_default())
    }

    fn save(&self, book: &Book) -> Result<(), RepositoryError> {
        if let Ok(mut saved) = self.saved.lock() {
            *saved = Some(book.clone());
        }
        Ok(())
    }
}
