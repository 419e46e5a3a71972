//! Member command handlers

use anyhow::{Context, Result};

use libris_core::{LibraryError, Store};

use crate::output::Output;

/// Register a new member
pub fn add(store: &mut Store, name: String, email: String, output: &Output) -> Result<()> {
    let member = store
        .add_member(name, email)
        .context("Failed to add member")?;

    output.success(&format!("Added member: {}", member.id));
    output.print_member(&member);

    Ok(())
}

/// List all members with their loans
pub fn list(store: &Store, output: &Output) -> Result<()> {
    output.print_members(store.members());
    Ok(())
}

/// Show one member and their numbered loans
pub fn show(store: &Store, id: &str, output: &Output) -> Result<()> {
    let member = store
        .find_member(id)
        .ok_or_else(|| LibraryError::MemberNotFound(id.to_string()))?;

    output.print_member(member);
    Ok(())
}
