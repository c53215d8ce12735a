//! JSON output formatting for cardiee.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use crate::cards::Flashcard;
use crate::error::CardieeError;
use crate::scheduling::interval_days;
use crate::session::SessionSummary;

/// Format cards as JSON
///
/// Each item carries a computed `due` flag and `days_until_due` for `today`,
/// and the number of days a correct answer would defer it.
///
/// # Errors
///
/// Returns `CardieeError::Parse` if JSON serialization fails.
pub fn format_cards_json(
    cards: &[Flashcard],
    title: &str,
    today: NaiveDate,
) -> Result<String, CardieeError> {
    let items: Vec<_> = cards
        .iter()
        .map(|card| {
            let mut value = serde_json::to_value(card)?;
            value["due"] = json!(card.is_due(today));
            value["days_until_due"] = json!(card.days_until_due(today));
            value["next_interval_days"] = json!(interval_days(card.growth_factor).ok());
            Ok(value)
        })
        .collect::<Result<_, serde_json::Error>>()?;

    let output = json!({
        "list": title,
        "count": cards.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a study summary as JSON
///
/// # Errors
///
/// Returns `CardieeError::Parse` if JSON serialization fails.
pub fn format_summary_json(summary: &SessionSummary) -> Result<String, CardieeError> {
    let output = json!({
        "status": if summary.is_complete() { "complete" } else { "interrupted" },
        "correct_count": summary.correct_count,
        "attempts_total": summary.attempts_total,
        "presentations": summary.presentations,
        "misses": summary.misses,
        "remaining": summary.remaining,
        "skipped": summary.skipped,
        "duration_seconds": summary.duration_seconds,
        "duration_formatted": summary.format_duration(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `CardieeError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, CardieeError> {
    Ok(serde_json::to_string_pretty(value)?)
}
