//! Errors returned by store operations
//!
//! No variant leaves a partial change behind. The rejection variants are
//! raised before anything is written; `Storage` means the write failed and
//! the change was dropped.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("No copies available of {0}")]
    NoCopiesAvailable(String),

    /// Loan position outside the member's list, or not a number
    #[error("Invalid selection")]
    InvalidSelection,

    /// A book must be added with at least one copy
    #[error("Number of copies must be at least 1")]
    InvalidCopies,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LibraryError {
    /// Whether this is a rejected request rather than a storage failure
    pub fn is_rejection(&self) -> bool {
        !matches!(self, LibraryError::Storage(_))
    }
}

pub type LibraryResult<T> = Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_messages() {
        assert_eq!(
            LibraryError::MemberNotFound("M-AAAAA".into()).to_string(),
            "Member not found: M-AAAAA"
        );
        assert_eq!(
            LibraryError::BookNotFound("B-AAAAA".into()).to_string(),
            "Book not found: B-AAAAA"
        );
        assert_eq!(
            LibraryError::NoCopiesAvailable("B-AAAAA".into()).to_string(),
            "No copies available of B-AAAAA"
        );
        assert_eq!(LibraryError::InvalidSelection.to_string(), "Invalid selection");
    }

    #[test]
    fn test_is_rejection() {
        assert!(LibraryError::InvalidSelection.is_rejection());
        assert!(LibraryError::BookNotFound("B-AAAAA".into()).is_rejection());

        let storage = LibraryError::from(StorageError::InvalidFormat {
            path: PathBuf::from("/x/library.json"),
            details: "bad".into(),
        });
        assert!(!storage.is_rejection());
        assert!(storage.to_string().contains("Invalid library file"));
    }
}
