//! Libris CLI
//!
//! Command-line interface for Libris - books, members and loans.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use libris_core::{Config, LibraryError, StorageError, Store};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "libris")]
#[command(about = "Libris - record keeping for a small library")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use this library file instead of the configured one
    #[arg(short, long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Menu,
    /// Manage books
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
    /// Manage members
    Member {
        #[command(subcommand)]
        command: MemberCommands,
    },
    /// Lend a book to a member
    Borrow {
        /// Member ID (M-XXXXX)
        member_id: String,
        /// Book ID (B-XXXXX)
        book_id: String,
    },
    /// Return a borrowed book
    Return {
        /// Member ID (M-XXXXX)
        member_id: String,
        /// Loan number as shown by `member show`, starting at 1
        number: String,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show library file location and record counts
    Status,
}

#[derive(Subcommand)]
enum BookCommands {
    /// Add a new book
    #[command(alias = "create")]
    Add {
        /// Book title
        title: String,
        /// Author name
        author: String,
        /// Number of copies owned
        #[arg(short, long, default_value_t = 1)]
        copies: u32,
    },
    /// List all books
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand)]
enum MemberCommands {
    /// Register a new member
    #[command(alias = "create")]
    Add {
        /// Member name
        name: String,
        /// Email address
        email: String,
    },
    /// List all members and their loans
    #[command(alias = "ls")]
    List,
    /// Show a member and their numbered loans
    Show {
        /// Member ID (M-XXXXX)
        id: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, data_file, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let result = run();
    if let Err(e) = &result {
        if let Some(hint) = recovery_hint(e) {
            eprintln!("Hint: {}", hint);
        }
    }
    result
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let mut config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    if let Some(file) = cli.file {
        config.data_file = absolute(file)?;
    }

    init_logging(&config);

    let mut store = Store::open_with_config(config)?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => commands::menu::run(&mut store, std::io::stdin().lock(), &output),
        Commands::Book { command } => handle_book_command(command, &mut store, &output),
        Commands::Member { command } => handle_member_command(command, &mut store, &output),
        Commands::Borrow { member_id, book_id } => {
            commands::loan::borrow(&mut store, &member_id, &book_id, &output)
        }
        Commands::Return { member_id, number } => {
            commands::loan::return_book(&mut store, &member_id, &number, &output)
        }
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Status => commands::status::show(&store, &output),
    }
}

fn handle_book_command(command: BookCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        BookCommands::Add {
            title,
            author,
            copies,
        } => commands::book::add(store, title, author, copies, output),
        BookCommands::List => commands::book::list(store, output),
    }
}

fn handle_member_command(
    command: MemberCommands,
    store: &mut Store,
    output: &Output,
) -> Result<()> {
    match command {
        MemberCommands::Add { name, email } => commands::member::add(store, name, email, output),
        MemberCommands::List => commands::member::list(store, output),
        MemberCommands::Show { id } => commands::member::show(store, &id, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Resolve a path given on the command line against the working directory
fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(cwd.join(path))
}

/// Initialize logging
///
/// Only initializes if LIBRIS_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log) so the
/// menu and tables on stdout stay clean.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("LIBRIS_LOG") else {
        return;
    };

    let log_path = config.log_path();

    let log_file = match open_log_file(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "libris_core={},libris_cli={}",
        log_level, log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}

/// Create (or truncate) the log file, making its directory first
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    File::create(path)
}

/// What the user can do about a storage failure, if anything
fn recovery_hint(err: &anyhow::Error) -> Option<&'static str> {
    let storage = match err.downcast_ref::<LibraryError>() {
        Some(LibraryError::Storage(e)) => Some(e),
        Some(_) => None,
        None => err.downcast_ref::<StorageError>(),
    };
    storage.and_then(|e| e.recovery_suggestion())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_creates_missing_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("nested").join("debug.log");

        let file = open_log_file(&path);
        assert!(file.is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_recovery_hint_for_malformed_file() {
        let err = anyhow::Error::new(StorageError::InvalidFormat {
            path: PathBuf::from("/data/library.json"),
            details: "expected value".into(),
        })
        .context("Failed to open library at \"/data/library.json\"");

        let hint = recovery_hint(&err).unwrap();
        assert!(hint.contains("move the file aside"));
    }

    #[test]
    fn test_recovery_hint_through_library_error() {
        let storage = StorageError::PermissionDenied {
            path: PathBuf::from("/data/library.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let err = anyhow::Error::new(LibraryError::from(storage));
        assert!(recovery_hint(&err).is_some());
    }

    #[test]
    fn test_no_hint_for_rejections() {
        let err = anyhow::Error::new(LibraryError::BookNotFound("B-NOPE0".into()));
        assert!(recovery_hint(&err).is_none());

        let err = anyhow::anyhow!("Failed to read current directory");
        assert!(recovery_hint(&err).is_none());
    }
}
