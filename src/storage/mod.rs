//! Storage layer for cardiee.
//!
//! This module provides the SQLite connection and schema migrations that
//! back the card store.

mod database;
mod migrations;

pub use database::Database;
