//! Borrow and return handlers

use anyhow::Result;

use libris_core::{parse_selection, LibraryError, Store};

use crate::output::Output;

/// Lend one copy of a book to a member
pub fn borrow(store: &mut Store, member_id: &str, book_id: &str, output: &Output) -> Result<()> {
    let loan = store.borrow_book(member_id, book_id)?;

    output.success("Book borrowed successfully");
    output.print_loan(&loan);

    Ok(())
}

/// Return a loan, picked by its 1-based number in the member's list
///
/// The selection is checked before anything is changed.
pub fn return_book(
    store: &mut Store,
    member_id: &str,
    selection: &str,
    output: &Output,
) -> Result<()> {
    let member = store
        .find_member(member_id)
        .ok_or_else(|| LibraryError::MemberNotFound(member_id.to_string()))?;
    let index = parse_selection(selection, member.borrowed.len())?;

    let loan = store.return_book(member_id, index)?;

    output.success("Book returned successfully");
    output.print_loan(&loan);

    Ok(())
}
