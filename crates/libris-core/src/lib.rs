//! Libris Core Library
//!
//! This crate provides the core functionality for Libris, a small
//! record-keeping tool for a library: books, members, and the loans
//! that connect them.
//!
//! # Architecture
//!
//! - **JSON file**: Source of truth, rewritten in full after every change
//!
//! The whole dataset lives in memory while the store is open.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! let book = store.add_book("Dune", "Herbert", 2)?;
//! let member = store.add_member("Paul", "paul@arrakis.example")?;
//!
//! store.borrow_book(&member.id, &book.id)?;
//! store.return_book(&member.id, 0)?;
//! ```
//!
//! # Modules
//!
//! - `store`: Record-management operations (main entry point)
//! - `models`: Books, members, and loans
//! - `id`: Random record identifiers
//! - `storage`: JSON persistence
//! - `config`: Application configuration
//! - `error`: Errors returned by store operations

pub mod config;
pub mod error;
pub mod id;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{LibraryError, LibraryResult};
pub use models::{Book, Library, Loan, Member};
pub use storage::{JsonPersistence, StorageError};
pub use store::{parse_selection, Store};
