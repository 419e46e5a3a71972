//! Interactive numbered menu
//!
//! Loops over the six record operations until the user picks 0 or input
//! ends. Rejected operations are reported and the loop carries on; storage
//! failures end it.

use anyhow::Result;
use std::io::BufRead;

use libris_core::{LibraryError, Store};

use crate::commands::{book, loan, member};
use crate::output::Output;
use crate::prompt::Prompter;

/// Run the menu loop reading answers from `input`
pub fn run<R: BufRead>(store: &mut Store, input: R, output: &Output) -> Result<()> {
    let mut prompter = Prompter::new(input);

    loop {
        print_menu();

        let Some(choice) = prompter.ask_trimmed("What operation do you want to perform")? else {
            return Ok(());
        };

        let result = match choice.as_str() {
            "1" => add_book(store, &mut prompter, output),
            "2" => book::list(store, output).map(|_| Step::Continue),
            "3" => add_member(store, &mut prompter, output),
            "4" => member::list(store, output).map(|_| Step::Continue),
            "5" => borrow(store, &mut prompter, output),
            "6" => return_book(store, &mut prompter, output),
            "0" => return Ok(()),
            _ => {
                output.error("Invalid choice, enter a number from 0 to 6");
                Ok(Step::Continue)
            }
        };

        match result {
            Ok(Step::Continue) => {}
            Ok(Step::Quit) => return Ok(()),
            Err(e) => report(e, output)?,
        }
    }
}

/// What the loop does after an action
enum Step {
    Continue,
    /// Input ran out mid-action
    Quit,
}

fn print_menu() {
    println!("{}", "=".repeat(50));
    println!("Library Management System");
    println!("1. Add Book");
    println!("2. List Books");
    println!("3. Add Member");
    println!("4. List Members");
    println!("5. Borrow Book");
    println!("6. Return Book");
    println!("0. Exit");
    println!("{}", "-".repeat(50));
}

/// Print rejected operations, pass anything else up
fn report(error: anyhow::Error, output: &Output) -> Result<()> {
    match error.downcast_ref::<LibraryError>() {
        Some(e) if e.is_rejection() => {
            output.error(&e.to_string());
            Ok(())
        }
        _ => Err(error),
    }
}

fn add_book<R: BufRead>(
    store: &mut Store,
    prompter: &mut Prompter<R>,
    output: &Output,
) -> Result<Step> {
    let Some(title) = prompter.ask("Book title")? else {
        return Ok(Step::Quit);
    };
    let Some(author) = prompter.ask("Author")? else {
        return Ok(Step::Quit);
    };
    let Some(copies) = prompter.ask_trimmed("Number of copies")? else {
        return Ok(Step::Quit);
    };

    let Ok(copies) = copies.parse::<u32>() else {
        output.error("Number of copies must be a whole number");
        return Ok(Step::Continue);
    };

    book::add(store, title, author, copies, output)?;
    Ok(Step::Continue)
}

fn add_member<R: BufRead>(
    store: &mut Store,
    prompter: &mut Prompter<R>,
    output: &Output,
) -> Result<Step> {
    let Some(name) = prompter.ask("Name")? else {
        return Ok(Step::Quit);
    };
    let Some(email) = prompter.ask("Email")? else {
        return Ok(Step::Quit);
    };

    member::add(store, name, email, output)?;
    Ok(Step::Continue)
}

fn borrow<R: BufRead>(
    store: &mut Store,
    prompter: &mut Prompter<R>,
    output: &Output,
) -> Result<Step> {
    let Some(member_id) = prompter.ask_trimmed("Member ID")? else {
        return Ok(Step::Quit);
    };
    if store.find_member(&member_id).is_none() {
        return Err(LibraryError::MemberNotFound(member_id).into());
    }

    let Some(book_id) = prompter.ask_trimmed("Book ID")? else {
        return Ok(Step::Quit);
    };

    loan::borrow(store, &member_id, &book_id, output)?;
    Ok(Step::Continue)
}

fn return_book<R: BufRead>(
    store: &mut Store,
    prompter: &mut Prompter<R>,
    output: &Output,
) -> Result<Step> {
    let Some(member_id) = prompter.ask_trimmed("Member ID")? else {
        return Ok(Step::Quit);
    };
    let member = store
        .find_member(&member_id)
        .ok_or_else(|| LibraryError::MemberNotFound(member_id.clone()))?;

    if member.borrowed.is_empty() {
        output.message("No borrowed books.");
        return Ok(Step::Continue);
    }
    output.print_loans(&member.borrowed);

    let Some(selection) = prompter.ask_trimmed("Enter book number to return")? else {
        return Ok(Step::Quit);
    };

    loan::return_book(store, &member_id, &selection, output)?;
    Ok(Step::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use libris_core::Config;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn open(temp_dir: &TempDir) -> Store {
        Store::open_with_config(Config {
            data_dir: temp_dir.path().to_path_buf(),
            data_file: PathBuf::from("library.json"),
            log_file: None,
        })
        .unwrap()
    }

    fn run_script(store: &mut Store, script: &str) -> Result<()> {
        run(store, Cursor::new(script.to_string()), &Output::new(OutputFormat::Quiet))
    }

    #[test]
    fn test_add_book_and_member() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);

        run_script(&mut store, "1\nDune\nHerbert\n2\n3\nPaul\npaul@example.com\n0\n").unwrap();

        assert_eq!(store.book_count(), 1);
        assert_eq!(store.books()[0].title, "Dune");
        assert_eq!(store.books()[0].available_copies, 2);
        assert_eq!(store.member_count(), 1);
        assert_eq!(store.members()[0].email, "paul@example.com");
    }

    #[test]
    fn test_borrow_and_return_flow() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        let book = store.add_book("Dune", "Herbert", 2).unwrap();
        let member = store.add_member("Paul", "paul@example.com").unwrap();

        let script = format!(
            "5\n{m}\n{b}\n5\n{m}\n{b}\n6\n{m}\n2\n0\n",
            m = member.id,
            b = book.id
        );
        run_script(&mut store, &script).unwrap();

        assert_eq!(store.find_book(&book.id).unwrap().available_copies, 1);
        assert_eq!(store.find_member(&member.id).unwrap().borrowed.len(), 1);
    }

    #[test]
    fn test_rejections_keep_the_loop_running() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        let book = store.add_book("Dune", "Herbert", 1).unwrap();
        let member = store.add_member("Paul", "paul@example.com").unwrap();

        let script = format!(
            "9\nabc\n5\nM-NOPE0\n6\n{m}\n5\n{m}\n{b}\n6\n{m}\nlast\n6\n{m}\n7\n1\nEmma\nAusten\nmany\n",
            m = member.id,
            b = book.id
        );
        run_script(&mut store, &script).unwrap();

        // The borrow went through; bad selections and bad copies changed nothing
        assert_eq!(store.find_member(&member.id).unwrap().borrowed.len(), 1);
        assert_eq!(store.find_book(&book.id).unwrap().available_copies, 0);
        assert_eq!(store.book_count(), 1);
    }

    #[test]
    fn test_free_text_stored_as_typed() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);

        run_script(
            &mut store,
            " 1 \n  The Left Hand \n Le Guin\n 3 \n3\n Ged \nged@example.com \n0\n",
        )
        .unwrap();

        assert_eq!(store.books()[0].title, "  The Left Hand ");
        assert_eq!(store.books()[0].author, " Le Guin");
        assert_eq!(store.books()[0].total_copies, 3);
        assert_eq!(store.members()[0].name, " Ged ");
        assert_eq!(store.members()[0].email, "ged@example.com ");
    }

    #[test]
    fn test_ids_and_numbers_tolerate_spaces() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        let book = store.add_book("Dune", "Herbert", 1).unwrap();
        let member = store.add_member("Paul", "paul@example.com").unwrap();

        let script = format!(
            "5\n {m} \n{b} \n 6\n{m}\n 1 \n0\n",
            m = member.id,
            b = book.id
        );
        run_script(&mut store, &script).unwrap();

        assert_eq!(store.find_book(&book.id).unwrap().available_copies, 1);
        assert!(store.find_member(&member.id).unwrap().borrowed.is_empty());
    }

    #[test]
    fn test_end_of_input_mid_action_quits() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);

        run_script(&mut store, "1\nDune\n").unwrap();
        assert_eq!(store.book_count(), 0);
    }
}
