//! Record-management interface
//!
//! The `Store` owns the whole library in memory and writes it back to the
//! JSON file after every successful change.
//!
//! ## Lifecycle
//!
//! Open once, pass `&mut Store` to whatever front-end needs it, drop when
//! done. Nothing is held open between operations: each save opens, writes
//! and closes the file.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;  // Creates or loads existing
//!
//! let book = store.add_book("Dune", "Herbert", 2)?;
//! let member = store.add_member("Paul", "paul@example.com")?;
//! store.borrow_book(&member.id, &book.id)?;
//! ```
//!
//! Every change is made on a copy of the library and only becomes current
//! once the file is written. Failed operations, including failed saves,
//! leave the in-memory library unchanged.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{LibraryError, LibraryResult};
use crate::id::{generate_unique_id, BOOK_PREFIX, MEMBER_PREFIX};
use crate::models::{Book, Library, Loan, Member};
use crate::storage::JsonPersistence;

/// Owner of the library data and its backing file
pub struct Store {
    /// Every book and member
    library: Library,
    /// Backing file handler
    persistence: JsonPersistence,
    /// Configuration
    config: Config,
}

impl Store {
    /// Open the store, creating an empty library file if none exists
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: Config) -> Result<Self> {
        let persistence = JsonPersistence::new(config.database_path());

        let library = persistence
            .load_or_create()
            .with_context(|| format!("Failed to open library at {:?}", persistence.path()))?;

        info!(
            "Opened library at {:?} ({} books, {} members)",
            persistence.path(),
            library.books.len(),
            library.members.len()
        );

        Ok(Self {
            library,
            persistence,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.persistence.path()
    }

    /// Size of the backing file in bytes
    pub fn storage_size(&self) -> u64 {
        self.persistence.size()
    }

    /// The full dataset
    pub fn library(&self) -> &Library {
        &self.library
    }

    // ==================== Books ====================

    /// Add a book with `copies` copies, all available
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        copies: u32,
    ) -> LibraryResult<Book> {
        if copies == 0 {
            return Err(LibraryError::InvalidCopies);
        }

        let mut next = self.library.clone();
        let id = generate_unique_id(BOOK_PREFIX, |id| next.find_book(id).is_some());
        let book = Book::new(id, title, author, copies);

        next.books.push(book.clone());
        self.commit(next)?;

        info!("Added book {} ({} copies)", book.id, copies);
        Ok(book)
    }

    /// All books, in the order they were added
    pub fn books(&self) -> &[Book] {
        &self.library.books
    }

    /// Get a book by id
    pub fn find_book(&self, id: &str) -> Option<&Book> {
        self.library.find_book(id)
    }

    pub fn book_count(&self) -> usize {
        self.library.books.len()
    }

    // ==================== Members ====================

    /// Register a member with no loans
    pub fn add_member(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> LibraryResult<Member> {
        let mut next = self.library.clone();
        let id = generate_unique_id(MEMBER_PREFIX, |id| next.find_member(id).is_some());
        let member = Member::new(id, name, email);

        next.members.push(member.clone());
        self.commit(next)?;

        info!("Added member {}", member.id);
        Ok(member)
    }

    /// All members, in the order they joined
    pub fn members(&self) -> &[Member] {
        &self.library.members
    }

    /// Get a member by id
    pub fn find_member(&self, id: &str) -> Option<&Member> {
        self.library.find_member(id)
    }

    pub fn member_count(&self) -> usize {
        self.library.members.len()
    }

    // ==================== Loans ====================

    /// Lend one copy of a book to a member
    ///
    /// The new loan goes to the end of the member's list.
    pub fn borrow_book(&mut self, member_id: &str, book_id: &str) -> LibraryResult<Loan> {
        let mut next = self.library.clone();

        let member_idx = next
            .members
            .iter()
            .position(|m| m.id == member_id)
            .ok_or_else(|| LibraryError::MemberNotFound(member_id.to_string()))?;

        let book = next
            .find_book_mut(book_id)
            .ok_or_else(|| LibraryError::BookNotFound(book_id.to_string()))?;

        if !book.take_copy() {
            return Err(LibraryError::NoCopiesAvailable(book_id.to_string()));
        }
        let loan = Loan::of(book);

        next.members[member_idx].borrowed.push(loan.clone());
        self.commit(next)?;

        info!("Member {} borrowed {}", member_id, book_id);
        Ok(loan)
    }

    /// Return the loan at `loan_index` (0-based) in the member's list
    ///
    /// Later loans shift down by one. If the loaned book no longer exists
    /// the loan is still removed.
    pub fn return_book(&mut self, member_id: &str, loan_index: usize) -> LibraryResult<Loan> {
        let mut next = self.library.clone();

        let member = next
            .find_member_mut(member_id)
            .ok_or_else(|| LibraryError::MemberNotFound(member_id.to_string()))?;

        if loan_index >= member.borrowed.len() {
            return Err(LibraryError::InvalidSelection);
        }
        let loan = member.borrowed.remove(loan_index);

        match next.find_book_mut(&loan.book_id) {
            Some(book) => {
                if !book.restore_copy() {
                    warn!(
                        "Book {} already has all {} copies available",
                        book.id, book.total_copies
                    );
                }
            }
            None => warn!("Returned loan refers to missing book {}", loan.book_id),
        }

        self.commit(next)?;

        info!("Member {} returned {}", member_id, loan.book_id);
        Ok(loan)
    }

    /// Total number of open loans
    pub fn loan_count(&self) -> usize {
        self.library.loan_count()
    }

    // ==================== Persistence ====================

    /// Write the whole library to the backing file
    pub fn flush(&self) -> LibraryResult<()> {
        self.persistence.save(&self.library)?;
        Ok(())
    }

    /// Save `next` and make it the current library
    ///
    /// If the save fails the current library stays as it was.
    fn commit(&mut self, next: Library) -> LibraryResult<()> {
        self.persistence.save(&next)?;
        self.library = next;
        Ok(())
    }
}

/// Turn a 1-based selection typed by a user into a loan index
///
/// Anything that is not a whole number in `1..=len` is rejected
/// before any state is touched.
pub fn parse_selection(input: &str, len: usize) -> LibraryResult<usize> {
    let choice: usize = input
        .trim()
        .parse()
        .map_err(|_| LibraryError::InvalidSelection)?;

    if choice == 0 || choice > len {
        return Err(LibraryError::InvalidSelection);
    }
    Ok(choice - 1)
}
