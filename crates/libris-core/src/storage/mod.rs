//! Storage layer
//!
//! Handles persistence of the library document.
//!
//! ## Architecture
//!
//! - **JSON file**: Source of truth, one document holding `books` and `members`
//!
//! Every mutation rewrites the whole file. There is no incremental append.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{atomic_write, JsonPersistence};
