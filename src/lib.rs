//! cardiee - spaced-repetition flashcards in your terminal
//!
//! This crate keeps a deck of question/answer cards in `SQLite` and schedules
//! each card's next review from how it was answered.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cards;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scheduling;
pub mod session;
pub mod storage;

pub use cards::{CardStore, Flashcard, SqliteCardStore};
pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::CardieeError;
pub use scheduling::{compute_next_state, Outcome, ScheduleUpdate};
pub use session::ReviewSession;
