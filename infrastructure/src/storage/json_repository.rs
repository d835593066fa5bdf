//! JSON file persistence for the book tree

use lore_application::{BookRepository, RepositoryError};
use lore_domain::Book;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`BookRepository`] storing the tree as pretty JSON at `<dir>/<key>.json`
///
/// Saves go through a sibling `.tmp` file and a rename, so an interrupted
/// write leaves the previous save intact.
pub struct JsonFileBookRepository {
    path: PathBuf,
}

impl JsonFileBookRepository {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    /// `dirs::data_dir()/lore-forge`, or `./.lore-forge` when the platform
    /// has no data directory
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("lore-forge"))
            .unwrap_or_else(|| PathBuf::from(".lore-forge"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BookRepository for JsonFileBookRepository {
    fn load(&self) -> Result<Option<Book>, RepositoryError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let book = serde_json::from_str(&json).map_err(|e| {
            RepositoryError::Corrupt(format!("{}: {}", self.path.display(), e))
        })?;
        debug!("Loaded book from {}", self.path.display());
        Ok(Some(book))
    }

    fn save(&self, book: &Book) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(book)
            .map_err(|e| RepositoryError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Saved book to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_domain::{Chapter, Page, Section};

    fn sample() -> Book {
        Book::new(vec![Section::new(
            "Wilds",
            vec![Chapter::new("Glaciers").with_pages(vec![
                Page::new("Glow", "The ice hums <blue>."),
                Page::titled("Drift"),
            ])],
        )])
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileBookRepository::new(dir.path(), "ice-wall-expedition-v1");
        assert!(repo.load().unwrap().is_none());
        assert!(repo.path().ends_with("ice-wall-expedition-v1.json"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileBookRepository::new(dir.path().join("nested"), "book");

        repo.save(&sample()).unwrap();
        assert_eq!(repo.load().unwrap(), Some(sample()));
        assert!(!repo.path().with_extension("json.tmp").exists());

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(repo.path()).unwrap()).unwrap();
        assert_eq!(raw[0]["title"], "Wilds");
        assert_eq!(raw[0]["chapters"][0]["pages"][1]["content"], "");
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileBookRepository::new(dir.path(), "book");
        repo.save(&sample()).unwrap();
        repo.save(&Book::default()).unwrap();
        assert_eq!(repo.load().unwrap(), Some(Book::default()));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileBookRepository::new(dir.path(), "book");
        fs::write(repo.path(), "{ not a book").unwrap();
        assert!(matches!(repo.load(), Err(RepositoryError::Corrupt(_))));
    }
}
