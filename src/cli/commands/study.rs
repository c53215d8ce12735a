//! Study CLI command.
//!
//! This module implements the `cardiee study` command: one interactive pass
//! over the cards that are due today.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use crate::cards::CardStore;
use crate::cli::args::OutputFormat;
use crate::error::CardieeError;
use crate::output::{format_summary, to_json};
use crate::session::{ReviewSession, StudyPrompt};

/// Consecutive failed saves before the pass gives up.
const MAX_SAVE_FAILURES: u32 = 3;

/// Settings for one study pass.
#[derive(Debug, Clone)]
pub struct StudyOptions {
    /// Date used for due checks and scheduling.
    pub today: NaiveDate,
    /// Ask before starting.
    pub confirm_start: bool,
    /// Show the expected answer after a miss.
    pub reveal_answer_on_miss: bool,
    /// Fixed seed for the card order.
    pub seed: Option<u64>,
}

/// Execute the study command.
///
/// Every answer is saved through `store` as soon as it is graded. If a save
/// fails the same card is asked again; after several failures in a row the
/// error is returned. A card deleted from the store mid-pass is skipped.
/// Running out of input ends the pass early and reports what was done.
///
/// # Errors
///
/// Returns an error if the due cards cannot be loaded, terminal I/O fails,
/// or saving keeps failing.
pub fn study<S, R, W>(
    store: &S,
    prompt: &mut StudyPrompt<R, W>,
    options: &StudyOptions,
    format: OutputFormat,
) -> Result<String, CardieeError>
where
    S: CardStore + ?Sized,
    R: BufRead,
    W: Write,
{
    let due = store.list_due(options.today)?;

    if due.is_empty() {
        return match format {
            OutputFormat::Json => to_json(&json!({
                "status": "nothing_due",
                "correct_count": 0,
                "attempts_total": 0,
            })),
            OutputFormat::Pretty => Ok("No due flashcards found.".to_string()),
        };
    }

    prompt.announce(due.len())?;
    if options.confirm_start
        && !prompt.confirm("Do you want to start studying these flashcards?")?
    {
        return match format {
            OutputFormat::Json => to_json(&json!({ "status": "canceled" })),
            OutputFormat::Pretty => Ok("Study session canceled.".to_string()),
        };
    }

    let mut rng = options
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let mut session = ReviewSession::new(due, &mut rng);
    let mut save_failures = 0;

    while let Some(card) = session.current().cloned() {
        let Some(response) = prompt.ask(session.progress(), &card)? else {
            log::debug!("Input closed with {} cards pending", session.pending_len());
            prompt.say("")?;
            break;
        };

        match session.answer_text(store, &response, options.today) {
            Ok(step) => {
                save_failures = 0;
                prompt.feedback(&step, options.reveal_answer_on_miss)?;
            },
            Err(CardieeError::NotFound(msg)) => {
                log::warn!("Card vanished during the pass: {msg}");
                save_failures = 0;
                prompt.card_gone(&card)?;
                session.skip_current();
            },
            Err(e) if e.is_storage() => {
                save_failures += 1;
                if save_failures >= MAX_SAVE_FAILURES {
                    return Err(e);
                }
                prompt.save_failed(&e.to_string())?;
            },
            Err(e) => return Err(e),
        }
    }

    format_summary(&session.summary(), format)
}
