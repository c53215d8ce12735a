//! Command implementations for cardiee.
//!
//! Each command returns the text to print on stdout. Commands that need the
//! deck take a [`CardStore`] so they can run against any backend.

mod study;

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use clap::CommandFactory;
use clap_complete::Shell;
use serde_json::json;

pub use study::{study, StudyOptions};

use crate::cards::{CardStore, Flashcard};
use crate::cli::args::{AddArgs, Cli, ClearArgs, ListArgs, OutputFormat, RemoveArgs};
use crate::config::{Config, Paths};
use crate::error::CardieeError;
use crate::output::{format_card_added, format_cards, to_json};
use crate::session::StudyPrompt;
use crate::storage::Database;

/// Execute init command
///
/// Creates the database and writes a default config file if there is none.
///
/// # Errors
///
/// Returns an error if the directory, database or config file cannot be
/// created.
pub fn init(paths: &Paths, format: OutputFormat) -> Result<String, CardieeError> {
    Database::create(paths)?;

    if !paths.config_file.exists() {
        Config::default().save_to_path(&paths.config_file)?;
    }

    match format {
        OutputFormat::Json => to_json(&json!({
            "status": "initialized",
            "database": paths.database,
            "config": paths.config_file,
        })),
        OutputFormat::Pretty => Ok(format!(
            "Initializing the database succeeded ({}).",
            paths.database.display()
        )),
    }
}

/// Execute add command
///
/// # Errors
///
/// Returns an error if the question or answer is empty or the card cannot
/// be stored.
pub fn add<S: CardStore + ?Sized>(
    store: &S,
    args: &AddArgs,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, CardieeError> {
    Flashcard::validate_text(&args.question, &args.answer)?;
    let card = store.create(args.question.trim(), args.answer.trim(), today)?;

    match format {
        OutputFormat::Json => to_json(&card),
        OutputFormat::Pretty => Ok(format_card_added(&card)),
    }
}

/// Execute remove command
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or an error if the prompt or the
/// store fails.
pub fn remove<S, R, W>(
    store: &S,
    prompt: &mut StudyPrompt<R, W>,
    args: &RemoveArgs,
    format: OutputFormat,
) -> Result<String, CardieeError>
where
    S: CardStore + ?Sized,
    R: BufRead,
    W: Write,
{
    let question = format!("Are you sure you want to delete flashcard with ID: {}?", args.id);
    if !args.yes && !prompt.confirm(&question)? {
        return aborted(format);
    }

    store.remove_by_id(args.id)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "status": "removed", "id": args.id })),
        OutputFormat::Pretty => Ok(format!("Flashcard with ID: {} removed.", args.id)),
    }
}

/// Execute list command
///
/// # Errors
///
/// Returns an error if the store cannot be read or output formatting fails.
pub fn list<S: CardStore + ?Sized>(
    store: &S,
    args: &ListArgs,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, CardieeError> {
    let (cards, title) = if args.due {
        (store.list_due(today)?, "Due Flashcards")
    } else {
        (store.list_all()?, "All Flashcards")
    };
    format_cards(&cards, title, today, format)
}

/// Execute clear command
///
/// # Errors
///
/// Returns an error if the prompt or the store fails.
pub fn clear<S, R, W>(
    store: &S,
    prompt: &mut StudyPrompt<R, W>,
    args: &ClearArgs,
    format: OutputFormat,
) -> Result<String, CardieeError>
where
    S: CardStore + ?Sized,
    R: BufRead,
    W: Write,
{
    if !args.yes && !prompt.confirm("Are you sure you want to delete all flashcards?")? {
        return aborted(format);
    }

    let removed = store.clear_all()?;

    match format {
        OutputFormat::Json => to_json(&json!({ "status": "cleared", "removed": removed })),
        OutputFormat::Pretty => Ok(format!("All flashcards cleared ({removed} removed).")),
    }
}

/// Generate shell completions for the specified shell.
///
/// # Errors
///
/// Returns an error if the script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, CardieeError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "cardiee", &mut buf);
    String::from_utf8(buf).map_err(|e| CardieeError::Validation(format!("UTF-8 error: {e}")))
}

fn aborted(format: OutputFormat) -> Result<String, CardieeError> {
    match format {
        OutputFormat::Json => to_json(&json!({ "status": "aborted" })),
        OutputFormat::Pretty => Ok("Aborted.".to_string()),
    }
}
