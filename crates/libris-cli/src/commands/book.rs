//! Book command handlers

use anyhow::{Context, Result};

use libris_core::Store;

use crate::output::Output;

/// Add a new book
pub fn add(
    store: &mut Store,
    title: String,
    author: String,
    copies: u32,
    output: &Output,
) -> Result<()> {
    let book = store
        .add_book(title, author, copies)
        .context("Failed to add book")?;

    output.success(&format!("Added book: {}", book.id));
    output.print_book(&book);

    Ok(())
}

/// List all books
pub fn list(store: &Store, output: &Output) -> Result<()> {
    output.print_books(store.books());
    Ok(())
}
