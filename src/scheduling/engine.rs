//! Growth-factor scheduling.
//!
//! A correct answer pushes the deadline out by `round(growth_factor * 1.5)`
//! days (using the factor *before* it is incremented) and bumps the factor by
//! one. An incorrect answer resets the factor to 1 and makes the card due
//! tomorrow. Starting from a fresh card, successive successes give intervals
//! of 2, 3, 5, 6, 8, ... days.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CardieeError;

/// Multiplier applied to the growth factor to get the success interval.
const GROWTH_MULTIPLIER: f64 = 1.5;

/// Days until a missed card is due again.
const RESET_INTERVAL_DAYS: u64 = 1;

/// Classification of a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The answer matched.
    Correct,
    /// The answer did not match.
    Incorrect,
}

impl Outcome {
    /// Build an outcome from a boolean match result.
    #[must_use]
    pub const fn from_match(matched: bool) -> Self {
        if matched {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correct => write!(f, "correct"),
            Self::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// New scheduling state for a card after one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    /// Growth factor to store.
    pub growth_factor: u32,
    /// Next due date.
    pub deadline: NaiveDate,
}

/// Number of days a correct answer defers a card with the given growth factor.
///
/// Halves round away from zero, so a factor of 3 gives 5 days.
///
/// # Errors
///
/// Returns `InvalidState` if `growth_factor` is below 1.
pub fn interval_days(growth_factor: u32) -> Result<u64, CardieeError> {
    ensure_valid(growth_factor)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let days = (f64::from(growth_factor) * GROWTH_MULTIPLIER).round() as u64;
    Ok(days)
}

/// Compute a card's next growth factor and deadline.
///
/// This is a pure function: the same inputs always produce the same output.
///
/// # Errors
///
/// Returns `InvalidState` if `growth_factor` is below 1 or the resulting date
/// is out of range.
pub fn compute_next_state(
    growth_factor: u32,
    outcome: Outcome,
    today: NaiveDate,
) -> Result<ScheduleUpdate, CardieeError> {
    ensure_valid(growth_factor)?;

    let (next_factor, offset) = match outcome {
        Outcome::Incorrect => (1, RESET_INTERVAL_DAYS),
        Outcome::Correct => {
            let next = growth_factor.checked_add(1).ok_or_else(|| {
                CardieeError::InvalidState(format!("growth factor {growth_factor} overflows"))
            })?;
            (next, interval_days(growth_factor)?)
        },
    };

    let deadline = today.checked_add_days(Days::new(offset)).ok_or_else(|| {
        CardieeError::InvalidState(format!("deadline {today} + {offset} days is out of range"))
    })?;

    Ok(ScheduleUpdate {
        growth_factor: next_factor,
        deadline,
    })
}

fn ensure_valid(growth_factor: u32) -> Result<(), CardieeError> {
    if growth_factor < 1 {
        return Err(CardieeError::InvalidState(format!(
            "growth factor must be at least 1, got {growth_factor}"
        )));
    }
    Ok(())
}
