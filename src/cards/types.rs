//! Flashcard data types.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CardieeError;

/// Identifier assigned by the store. Never reused.
pub type CardId = i64;

/// A question/answer card with its scheduling state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Unique card ID.
    pub id: CardId,
    /// Prompt shown to the user.
    pub question: String,
    /// Expected answer.
    pub answer: String,
    /// Date on or after which the card is due.
    pub deadline: NaiveDate,
    /// Multiplicative base for the next success interval (always >= 1).
    pub growth_factor: u32,
    /// When the card was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Local>>,
    /// When the card's schedule last changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Local>>,
}

impl Flashcard {
    /// Create a fresh card due on `today` with growth factor 1.
    #[must_use]
    pub fn new(id: CardId, question: &str, answer: &str, today: NaiveDate) -> Self {
        Self {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
            deadline: today,
            growth_factor: 1,
            created_at: None,
            updated_at: None,
        }
    }

    /// Check that a question and answer are usable before storing them.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if either is empty or only whitespace.
    pub fn validate_text(question: &str, answer: &str) -> Result<(), CardieeError> {
        if question.trim().is_empty() {
            return Err(CardieeError::Validation("question must not be empty".to_string()));
        }
        if answer.trim().is_empty() {
            return Err(CardieeError::Validation("answer must not be empty".to_string()));
        }
        Ok(())
    }

    /// Whether the card should be reviewed on `today`.
    #[must_use]
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.deadline <= today
    }

    /// Days until the card is due; zero or negative when it is already due.
    #[must_use]
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_card_is_due_today() {
        let today = day(2024, 5, 1);
        let card = Flashcard::new(1, "Capital of France?", "Paris", today);
        assert_eq!(card.growth_factor, 1);
        assert_eq!(card.deadline, today);
        assert!(card.is_due(today));
    }

    #[test]
    fn test_is_due_boundaries() {
        let mut card = Flashcard::new(1, "q", "a", day(2024, 5, 1));
        card.deadline = day(2024, 5, 3);

        assert!(!card.is_due(day(2024, 5, 2)));
        assert!(card.is_due(day(2024, 5, 3)));
        assert!(card.is_due(day(2024, 5, 4)));
        assert_eq!(card.days_until_due(day(2024, 5, 1)), 2);
        assert_eq!(card.days_until_due(day(2024, 5, 4)), -1);
    }

    #[test]
    fn test_validate_text() {
        assert!(Flashcard::validate_text("q", "a").is_ok());
        assert!(matches!(
            Flashcard::validate_text("   ", "a"),
            Err(CardieeError::Validation(_))
        ));
        assert!(matches!(
            Flashcard::validate_text("q", ""),
            Err(CardieeError::Validation(_))
        ));
    }

    #[test]
    fn test_serializes_deadline_as_date() {
        let card = Flashcard::new(7, "q", "a", day(2024, 12, 31));
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["deadline"], "2024-12-31");
        assert_eq!(json["growth_factor"], 1);
        assert!(json.get("created_at").is_none());
    }
}
