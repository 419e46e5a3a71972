//! Status command handler

use anyhow::Result;

use libris_core::Store;

use crate::output::{Output, OutputFormat};

/// Show where the library lives and what it holds
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let total_copies: u64 = store.books().iter().map(|b| b.total_copies as u64).sum();
    let available_copies: u64 = store
        .books()
        .iter()
        .map(|b| b.available_copies as u64)
        .sum();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "library_path": store.path(),
                    "size": store.storage_size(),
                    "counts": {
                        "books": store.book_count(),
                        "members": store.member_count(),
                        "loans": store.loan_count(),
                        "copies": total_copies,
                        "available_copies": available_copies
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.path().display());
        }
        OutputFormat::Human => {
            println!("Libris Status");
            println!("=============");
            println!();
            println!("Storage:");
            println!("  Location: {}", store.path().display());
            println!("  Size:     {} bytes", store.storage_size());
            println!();
            println!("Contents:");
            println!("  Books:   {}", store.book_count());
            println!("  Copies:  {} ({} available)", total_copies, available_copies);
            println!("  Members: {}", store.member_count());
            println!("  Loans:   {}", store.loan_count());
        }
    }

    Ok(())
}
