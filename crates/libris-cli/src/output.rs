//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output (fixed-width tables)
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use libris_core::models::TIMESTAMP_FORMAT;
use libris_core::{Book, Loan, Member};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single book
    pub fn print_book(&self, book: &Book) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", book.id);
                println!("Title:     {}", book.title);
                println!("Author:    {}", book.author);
                println!(
                    "Copies:    {} of {} available",
                    book.available_copies, book.total_copies
                );
                println!("Added:     {}", book.added_on.format(TIMESTAMP_FORMAT));
            }
            OutputFormat::Json => print_json(book),
            OutputFormat::Quiet => println!("{}", book.id),
        }
    }

    /// Print the book table
    pub fn print_books(&self, books: &[Book]) {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No books found.");
                    return;
                }
                println!(
                    "{:12} {:25} {:20} {}",
                    "ID", "TITLE", "AUTHOR", "TOTAL/AVAIL"
                );
                for book in books {
                    println!("{}", book_row(book));
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => print_json(books),
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.id);
                }
            }
        }
    }

    /// Print a single member with their loans
    pub fn print_member(&self, member: &Member) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", member.id);
                println!("Name:      {}", member.name);
                println!("Email:     {}", member.email);
                println!();
                self.print_loans(&member.borrowed);
            }
            OutputFormat::Json => print_json(member),
            OutputFormat::Quiet => println!("{}", member.id),
        }
    }

    /// Print the member table, each followed by their loans
    pub fn print_members(&self, members: &[Member]) {
        match self.format {
            OutputFormat::Human => {
                if members.is_empty() {
                    println!("No members found.");
                    return;
                }
                println!("{:12} {:25} {:30}", "ID", "NAME", "EMAIL");
                for member in members {
                    println!("{}", member_row(member));
                    for loan in &member.borrowed {
                        println!("    - {}", loan.label());
                    }
                }
                println!("\n{} member(s)", members.len());
            }
            OutputFormat::Json => print_json(members),
            OutputFormat::Quiet => {
                for member in members {
                    println!("{}", member.id);
                }
            }
        }
    }

    /// Print a member's loans, numbered from 1 as used by `return`
    pub fn print_loans(&self, loans: &[Loan]) {
        match self.format {
            OutputFormat::Human => {
                if loans.is_empty() {
                    println!("No borrowed books.");
                    return;
                }
                println!("── Borrowed books ({}) ──", loans.len());
                for (i, loan) in loans.iter().enumerate() {
                    println!("{}. {}", i + 1, loan.label());
                }
            }
            OutputFormat::Json => print_json(loans),
            OutputFormat::Quiet => {
                for loan in loans {
                    println!("{}", loan.book_id);
                }
            }
        }
    }

    /// Print a single loan
    pub fn print_loan(&self, loan: &Loan) {
        match self.format {
            OutputFormat::Human => println!("{}", loan.label()),
            OutputFormat::Json => print_json(loan),
            OutputFormat::Quiet => println!("{}", loan.book_id),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a rejected operation without stopping the program
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("✗ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "error", "message": message})
                );
            }
            OutputFormat::Quiet => eprintln!("{}", message),
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON: {}", e),
    }
}

/// One line of the book table
fn book_row(book: &Book) -> String {
    format!(
        "{:12} {:25} {:20} {}/{:>3}",
        book.id,
        clip(&book.title, 24),
        clip(&book.author, 19),
        book.total_copies,
        book.available_copies
    )
}

/// One line of the member table
fn member_row(member: &Member) -> String {
    format!(
        "{:12} {:25} {:30}",
        member.id,
        clip(&member.name, 24),
        clip(&member.email, 29)
    )
}

/// First `max_chars` characters of `s`
fn clip(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
