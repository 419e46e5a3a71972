//! JSON file persistence
//!
//! Handles saving and loading the library document to/from the filesystem.
//! Uses atomic writes (write to temp file, then rename) to prevent corruption.
//!
//! The document is rewritten in full on every save, pretty-printed with a
//! four-space indent.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use super::error::{StorageError, StorageResult};
use crate::models::Library;

/// Persistence layer for the library document
pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    /// Create a persistence handler for the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the backing file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Size of the backing file in bytes, 0 if missing
    pub fn size(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    /// Save the library, replacing the previous content
    pub fn save(&self, library: &Library) -> StorageResult<()> {
        let bytes = to_pretty_json(library)?;
        atomic_write(&self.path, &bytes)?;
        debug!(
            "Saved {} books and {} members to {:?}",
            library.books.len(),
            library.members.len(),
            self.path
        );
        Ok(())
    }

    /// Load the library from disk
    ///
    /// Returns `None` if the file doesn't exist. A file holding only
    /// whitespace loads as an empty library.
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load(&self) -> StorageResult<Option<Library>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::from_read(e, self.path.clone()))?;

        if content.trim().is_empty() {
            debug!("Library file {:?} is empty, starting fresh", self.path);
            return Ok(Some(Library::default()));
        }

        let library =
            serde_json::from_str(&content).map_err(|e| StorageError::InvalidFormat {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        Ok(Some(library))
    }

    /// Load the existing library or create an empty one
    ///
    /// If the file is missing, an empty library is written to it first.
    pub fn load_or_create(&self) -> StorageResult<Library> {
        if let Some(library) = self.load()? {
            return Ok(library);
        }

        let library = Library::default();
        self.save(&library)?;
        debug!("Created new library file at {:?}", self.path);
        Ok(library)
    }
}

/// Encode as JSON with a four-space indent
fn to_pretty_json<T: Serialize>(value: &T) -> StorageResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
pub fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, Loan, Member};
    use tempfile::TempDir;

    fn test_persistence(temp_dir: &TempDir) -> JsonPersistence {
        JsonPersistence::new(temp_dir.path().join("library.json"))
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        // Initially no file
        assert!(!persistence.exists());
        assert!(persistence.load().unwrap().is_none());

        let mut library = Library::default();
        let book = Book::new("B-AAAAA", "Dune", "Herbert", 2);
        let mut member = Member::new("M-BBBBB", "Paul", "paul@example.com");
        member.borrowed.push(Loan::of(&book));
        library.books.push(book);
        library.members.push(member);

        persistence.save(&library).unwrap();
        assert!(persistence.exists());

        let loaded = persistence.load().unwrap().unwrap();
        assert_eq!(loaded, library);
    }

    #[test]
    fn test_load_or_create_new() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        let library = persistence.load_or_create().unwrap();
        assert!(library.books.is_empty());
        assert!(library.members.is_empty());
        assert!(persistence.exists());

        let content = fs::read_to_string(persistence.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!({"books": [], "members": []}));
    }

    #[test]
    fn test_load_or_create_existing() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        let mut library = Library::default();
        library.books.push(Book::new("B-AAAAA", "Emma", "Austen", 1));
        persistence.save(&library).unwrap();

        let loaded = persistence.load_or_create().unwrap();
        assert_eq!(loaded.books.len(), 1);
        assert_eq!(loaded.books[0].title, "Emma");
    }

    #[test]
    fn test_empty_file_loads_as_empty_library() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);
        fs::write(persistence.path(), "  \n").unwrap();

        let library = persistence.load().unwrap().unwrap();
        assert_eq!(library, Library::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);
        fs::write(persistence.path(), "{\"books\": [").unwrap();

        let err = persistence.load().unwrap_err();
        assert!(matches!(err, StorageError::InvalidFormat { .. }));

        // load_or_create must not overwrite a broken file
        assert!(persistence.load_or_create().is_err());
        let content = fs::read_to_string(persistence.path()).unwrap();
        assert_eq!(content, "{\"books\": [");
    }

    #[test]
    fn test_pretty_printed_with_four_spaces() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        persistence.save(&Library::default()).unwrap();

        let content = fs::read_to_string(persistence.path()).unwrap();
        assert!(content.contains("\n    \"books\": []"));
        assert!(content.contains("\n    \"members\": []"));
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("a").join("b").join("library.json");

        atomic_write(&nested_path, b"{}").unwrap();

        assert!(nested_path.exists());
        assert_eq!(fs::read_to_string(&nested_path).unwrap(), "{}");
        // Temp file is gone after rename
        assert!(!nested_path.with_extension("tmp").exists());
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        let mut library = Library::default();
        for i in 0..5 {
            library
                .books
                .push(Book::new(format!("B-0000{}", i), "Title", "Author", 1));
        }
        persistence.save(&library).unwrap();
        let large = persistence.size();

        library.books.truncate(1);
        persistence.save(&library).unwrap();

        assert!(persistence.size() < large);
        assert_eq!(persistence.load().unwrap().unwrap().books.len(), 1);
    }
}
