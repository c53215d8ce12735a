//! Flashcards and their storage.
//!
//! Cards live in the local `SQLite` database and are reached through the
//! [`CardStore`] trait.

mod store;
mod types;

#[cfg(test)]
pub use store::MockCardStore;
pub use store::{CardStore, SqliteCardStore};
pub use types::{CardId, Flashcard};
