//! Error types for cardiee.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while managing or studying flashcards.
#[derive(Debug, Error)]
pub enum CardieeError {
    /// A scheduling precondition was violated (e.g. growth factor below 1).
    #[error("Invalid card state: {0}")]
    InvalidState(String),

    /// The card store failed to read or persist data.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A card with the requested ID does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The database has not been created yet.
    #[error("Database not found at {}. Please run `cardiee init`", .0.display())]
    NotInitialized(PathBuf),

    /// User supplied input was rejected.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Configuration could not be loaded or saved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal or filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CardieeError {
    /// Whether this error originated at the storage boundary.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
