//! Output formatting for cardiee.
//!
//! This module provides formatters for displaying cards and study results in
//! various formats.

mod json;
mod pretty;

use chrono::NaiveDate;

use crate::cards::Flashcard;
use crate::cli::args::OutputFormat;
use crate::error::CardieeError;
use crate::session::SessionSummary;

pub use json::*;
pub use pretty::*;

/// Format cards based on output format
///
/// # Errors
///
/// Returns `CardieeError::Parse` if JSON serialization fails.
pub fn format_cards(
    cards: &[Flashcard],
    title: &str,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, CardieeError> {
    match format {
        OutputFormat::Pretty => Ok(format_cards_pretty(cards, title, today)),
        OutputFormat::Json => format_cards_json(cards, title, today),
    }
}

/// Format a study summary based on output format
///
/// # Errors
///
/// Returns `CardieeError::Parse` if JSON serialization fails.
pub fn format_summary(
    summary: &SessionSummary,
    format: OutputFormat,
) -> Result<String, CardieeError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => format_summary_json(summary),
    }
}
