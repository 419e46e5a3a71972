//! Data models for Libris
//!
//! Defines the core data structures: Book, Member, Loan, and the Library
//! document that holds both collections. Field order here is the field
//! order of the persisted JSON.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

/// Timestamp format used in the backing file
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time, truncated to whole seconds so it survives a save/load cycle
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// A book with a fixed number of lendable copies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Identifier of the form `B-XXXXX`
    pub id: String,
    pub title: String,
    pub author: String,
    /// Copies owned, fixed at creation
    pub total_copies: u32,
    /// Copies not currently lent out
    pub available_copies: u32,
    /// When this book was added
    #[serde(with = "timestamp")]
    pub added_on: NaiveDateTime,
}

impl Book {
    /// Create a book with all copies available
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        copies: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            total_copies: copies,
            available_copies: copies,
            added_on: now(),
        }
    }

    /// Whether at least one copy can be lent
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// Take one copy off the shelf. Returns false if none are left.
    pub fn take_copy(&mut self) -> bool {
        if !self.is_available() {
            return false;
        }
        self.available_copies -= 1;
        true
    }

    /// Put one copy back, never exceeding the number owned.
    ///
    /// Returns false if the count was already at `total_copies`.
    pub fn restore_copy(&mut self) -> bool {
        if self.available_copies >= self.total_copies {
            return false;
        }
        self.available_copies += 1;
        true
    }

    /// Label shown in selection lists
    pub fn label(&self) -> String {
        format!(
            "{} - {} ({}) | Available: {}",
            self.title, self.author, self.id, self.available_copies
        )
    }
}

/// A record of one member holding one copy of one book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Loan {
    /// Id of the borrowed book. Not owned; may dangle.
    pub book_id: String,
    /// Title copied from the book at borrow time
    pub title: String,
    #[serde(with = "timestamp")]
    pub borrow_on: NaiveDateTime,
}

impl Loan {
    /// Record a loan of `book`, stamped with the current time
    pub fn of(book: &Book) -> Self {
        Self {
            book_id: book.id.clone(),
            title: book.title.clone(),
            borrow_on: now(),
        }
    }

    /// Label shown in selection lists
    pub fn label(&self) -> String {
        format!(
            "{} ({}) | Borrowed On: {}",
            self.title,
            self.book_id,
            self.borrow_on.format(TIMESTAMP_FORMAT)
        )
    }
}

/// A library member and the loans they currently hold
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    /// Identifier of the form `M-XXXXX`
    pub id: String,
    pub name: String,
    pub email: String,
    /// Current loans, oldest first
    pub borrowed: Vec<Loan>,
}

impl Member {
    /// Create a member with no loans
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            borrowed: Vec::new(),
        }
    }

    /// Label shown in selection lists
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

/// The full dataset: every book and every member
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Library {
    pub books: Vec<Book>,
    pub members: Vec<Member>,
}

impl Library {
    /// First book with this exact id
    pub fn find_book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn find_book_mut(&mut self, id: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id == id)
    }

    /// First member with this exact id
    pub fn find_member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn find_member_mut(&mut self, id: &str) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.id == id)
    }

    /// Number of loans across all members
    pub fn loan_count(&self) -> usize {
        self.members.iter().map(|m| m.borrowed.len()).sum()
    }
}

/// Serde adapter for `YYYY-MM-DD HH:MM:SS` timestamps
mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}
