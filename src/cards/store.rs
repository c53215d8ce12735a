//! Card persistence.
//!
//! [`CardStore`] is the seam between the review logic and storage. The
//! session and CLI only talk to the trait, so tests can swap in a mock.

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::types::{CardId, Flashcard};
use crate::error::CardieeError;
use crate::storage::Database;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_COLUMNS: &str =
    "SELECT id, question, answer, deadline, growth_factor, created_at, updated_at FROM cards";

/// Operations the rest of the crate needs from card storage.
#[cfg_attr(test, mockall::automock)]
pub trait CardStore {
    /// All cards with `deadline <= today`, earliest deadline first.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the query fails.
    fn list_due(&self, today: NaiveDate) -> Result<Vec<Flashcard>, CardieeError>;

    /// Every card, least recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the query fails.
    fn list_all(&self) -> Result<Vec<Flashcard>, CardieeError>;

    /// Persist the result of one review.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown ID and `Storage` if the write fails.
    fn update_state(
        &self,
        id: CardId,
        growth_factor: u32,
        deadline: NaiveDate,
    ) -> Result<(), CardieeError>;

    /// Insert a new card due on `today` with growth factor 1.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the insert fails.
    fn create(
        &self,
        question: &str,
        answer: &str,
        today: NaiveDate,
    ) -> Result<Flashcard, CardieeError>;

    /// Delete one card.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown ID and `Storage` if the delete fails.
    fn remove_by_id(&self, id: CardId) -> Result<(), CardieeError>;

    /// Delete every card, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the delete fails.
    fn clear_all(&self) -> Result<usize, CardieeError>;
}

/// [`CardStore`] backed by the local `SQLite` database.
pub struct SqliteCardStore {
    db: Database,
}

impl SqliteCardStore {
    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Look up a single card.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the query fails.
    pub fn get(&self, id: CardId) -> Result<Option<Flashcard>, CardieeError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .map_err(|e| CardieeError::Storage(format!("Failed to prepare query: {e}")))?;

        let raw = stmt
            .query_row([id], read_row)
            .optional()
            .map_err(|e| CardieeError::Storage(format!("Failed to query card: {e}")))?;

        raw.map(RawCard::into_card).transpose()
    }

    fn query(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Flashcard>, CardieeError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| CardieeError::Storage(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(args, read_row)
            .map_err(|e| CardieeError::Storage(format!("Failed to query cards: {e}")))?;

        let mut cards = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| CardieeError::Storage(e.to_string()))?;
            cards.push(raw.into_card()?);
        }

        Ok(cards)
    }
}

impl CardStore for SqliteCardStore {
    fn list_due(&self, today: NaiveDate) -> Result<Vec<Flashcard>, CardieeError> {
        let today = today.format(DATE_FORMAT).to_string();
        self.query(
            &format!("{SELECT_COLUMNS} WHERE deadline <= ?1 ORDER BY deadline ASC, id ASC"),
            &[&today],
        )
    }

    fn list_all(&self) -> Result<Vec<Flashcard>, CardieeError> {
        self.query(&format!("{SELECT_COLUMNS} ORDER BY updated_at ASC, id ASC"), &[])
    }

    fn update_state(
        &self,
        id: CardId,
        growth_factor: u32,
        deadline: NaiveDate,
    ) -> Result<(), CardieeError> {
        if growth_factor < 1 {
            return Err(CardieeError::InvalidState(format!(
                "refusing to store growth factor {growth_factor} for card {id}"
            )));
        }

        let changed = self
            .db
            .connection()
            .execute(
                r"UPDATE cards SET
                  deadline = ?1,
                  growth_factor = ?2,
                  updated_at = ?3
                  WHERE id = ?4",
                params![
                    deadline.format(DATE_FORMAT).to_string(),
                    growth_factor,
                    format_timestamp(Utc::now()),
                    id,
                ],
            )
            .map_err(|e| CardieeError::Storage(format!("Failed to update card {id}: {e}")))?;

        if changed == 0 {
            return Err(CardieeError::NotFound(format!("Flashcard with ID: {id}")));
        }

        log::debug!("Card {id} rescheduled to {deadline} (growth factor {growth_factor})");
        Ok(())
    }

    fn create(
        &self,
        question: &str,
        answer: &str,
        today: NaiveDate,
    ) -> Result<Flashcard, CardieeError> {
        let conn = self.db.connection();
        let now = Utc::now();

        conn.execute(
            r"INSERT INTO cards (question, answer, deadline, growth_factor, created_at, updated_at)
              VALUES (?1, ?2, ?3, 1, ?4, ?4)",
            params![
                question,
                answer,
                today.format(DATE_FORMAT).to_string(),
                format_timestamp(now),
            ],
        )
        .map_err(|e| CardieeError::Storage(format!("Failed to insert card: {e}")))?;

        let id = conn.last_insert_rowid();
        log::debug!("Inserted card {id}");

        let mut card = Flashcard::new(id, question, answer, today);
        card.created_at = Some(now.with_timezone(&Local));
        card.updated_at = card.created_at;
        Ok(card)
    }

    fn remove_by_id(&self, id: CardId) -> Result<(), CardieeError> {
        let changed = self
            .db
            .connection()
            .execute("DELETE FROM cards WHERE id = ?1", [id])
            .map_err(|e| CardieeError::Storage(format!("Failed to delete card {id}: {e}")))?;

        if changed == 0 {
            return Err(CardieeError::NotFound(format!("Flashcard with ID: {id}")));
        }

        log::debug!("Deleted card {id}");
        Ok(())
    }

    fn clear_all(&self) -> Result<usize, CardieeError> {
        let removed = self
            .db
            .connection()
            .execute("DELETE FROM cards", [])
            .map_err(|e| CardieeError::Storage(format!("Failed to clear cards: {e}")))?;

        log::debug!("Cleared {removed} cards");
        Ok(removed)
    }
}

/// Column values as stored, before date parsing.
struct RawCard {
    id: CardId,
    question: String,
    answer: String,
    deadline: String,
    growth_factor: i64,
    created_at: String,
    updated_at: String,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawCard> {
    Ok(RawCard {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        deadline: row.get(3)?,
        growth_factor: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl RawCard {
    fn into_card(self) -> Result<Flashcard, CardieeError> {
        let deadline = NaiveDate::parse_from_str(&self.deadline, DATE_FORMAT).map_err(|e| {
            CardieeError::Storage(format!(
                "Card {} has invalid deadline {:?}: {e}",
                self.id, self.deadline
            ))
        })?;

        let growth_factor = u32::try_from(self.growth_factor)
            .ok()
            .filter(|f| *f >= 1)
            .ok_or_else(|| {
                CardieeError::InvalidState(format!(
                    "Card {} has growth factor {}",
                    self.id, self.growth_factor
                ))
            })?;

        Ok(Flashcard {
            id: self.id,
            question: self.question,
            answer: self.answer,
            deadline,
            growth_factor,
            created_at: parse_timestamp(&self.created_at),
            updated_at: parse_timestamp(&self.updated_at),
        })
    }
}

/// Timestamps are stored in UTC with a fixed width so text order is time order.
fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> SqliteCardStore {
        SqliteCardStore::with_database(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_create_and_get() {
        let store = store();
        let today = day(2024, 4, 1);

        let card = store.create("2 + 2?", "4", today).unwrap();
        assert_eq!(card.growth_factor, 1);
        assert_eq!(card.deadline, today);

        let loaded = store.get(card.id).unwrap().unwrap();
        assert_eq!(loaded.question, "2 + 2?");
        assert_eq!(loaded.answer, "4");
        assert_eq!(loaded.deadline, today);
        assert!(loaded.created_at.is_some());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let store = store();
        let today = day(2024, 4, 1);

        let first = store.create("a", "a", today).unwrap();
        store.remove_by_id(first.id).unwrap();
        let second = store.create("b", "b", today).unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn test_list_due_respects_deadline() {
        let store = store();
        let today = day(2024, 4, 10);

        let overdue = store.create("old", "a", day(2024, 4, 1)).unwrap();
        let due = store.create("now", "a", today).unwrap();
        let later = store.create("later", "a", today).unwrap();
        store.update_state(later.id, 2, day(2024, 4, 12)).unwrap();

        let cards = store.list_due(today).unwrap();
        let ids: Vec<_> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![overdue.id, due.id]);

        assert_eq!(store.list_due(day(2024, 4, 12)).unwrap().len(), 3);
    }

    #[test]
    fn test_update_state() {
        let store = store();
        let card = store.create("q", "a", day(2024, 1, 1)).unwrap();

        store.update_state(card.id, 4, day(2024, 1, 6)).unwrap();

        let loaded = store.get(card.id).unwrap().unwrap();
        assert_eq!(loaded.growth_factor, 4);
        assert_eq!(loaded.deadline, day(2024, 1, 6));
    }

    #[test]
    fn test_update_unknown_card() {
        let store = store();
        let err = store.update_state(99, 2, day(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, CardieeError::NotFound(_)));
    }

    #[test]
    fn test_update_rejects_zero_factor() {
        let store = store();
        let card = store.create("q", "a", day(2024, 1, 1)).unwrap();
        let err = store.update_state(card.id, 0, day(2024, 1, 2)).unwrap_err();
        assert!(matches!(err, CardieeError::InvalidState(_)));
    }

    #[test]
    fn test_remove_by_id() {
        let store = store();
        let card = store.create("q", "a", day(2024, 1, 1)).unwrap();

        store.remove_by_id(card.id).unwrap();
        assert!(store.get(card.id).unwrap().is_none());

        let err = store.remove_by_id(card.id).unwrap_err();
        assert!(matches!(err, CardieeError::NotFound(_)));
    }

    #[test]
    fn test_clear_all() {
        let store = store();
        let today = day(2024, 1, 1);
        store.create("a", "1", today).unwrap();
        store.create("b", "2", today).unwrap();

        assert_eq!(store.clear_all().unwrap(), 2);
        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.clear_all().unwrap(), 0);
    }

    #[test]
    fn test_list_all_includes_future_cards() {
        let store = store();
        let today = day(2024, 1, 1);
        let card = store.create("a", "1", today).unwrap();
        store.update_state(card.id, 3, day(2024, 2, 1)).unwrap();

        assert!(store.list_due(today).unwrap().is_empty());
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_timestamps_stored_in_utc() {
        let store = store();
        let card = store.create("q", "a", day(2024, 1, 1)).unwrap();
        store.update_state(card.id, 2, day(2024, 1, 3)).unwrap();

        let (created, updated): (String, String) = store
            .db
            .connection()
            .query_row(
                "SELECT created_at, updated_at FROM cards WHERE id = ?1",
                [card.id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();

        assert!(created.ends_with('Z'), "{created}");
        assert!(updated.ends_with('Z'), "{updated}");
        assert_eq!(created.len(), updated.len());
        assert!(store.get(card.id).unwrap().unwrap().updated_at.is_some());
    }

    #[test]
    fn test_list_all_orders_by_update_time() {
        let store = store();
        let today = day(2024, 1, 1);
        let first = store.create("first", "1", today).unwrap();
        let second = store.create("second", "2", today).unwrap();

        let conn = store.db.connection();
        conn.execute(
            "UPDATE cards SET updated_at = ?1 WHERE id = ?2",
            params!["2024-03-31T01:30:00.000000Z", first.id],
        )
        .unwrap();
        conn.execute(
            "UPDATE cards SET updated_at = ?1 WHERE id = ?2",
            params!["2024-03-31T00:30:00.000000Z", second.id],
        )
        .unwrap();

        let ids: Vec<_> = store.list_all().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
