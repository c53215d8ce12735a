//! `SQLite` database connection and operations.
//!
//! The database is stored at `~/.cardiee/cardiee.db` and holds the `cards`
//! table.

use std::path::Path;

use rusqlite::Connection;

use crate::config::Paths;
use crate::error::CardieeError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create the database (and its parent directory) if needed.
    ///
    /// This is what `cardiee init` runs. It is safe to call on an existing
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the database
    /// cannot be opened, or migrations fail.
    pub fn create(paths: &Paths) -> Result<Self, CardieeError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open an existing database.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` if the database file does not exist, or an
    /// error if it cannot be opened or migrated.
    pub fn open(paths: &Paths) -> Result<Self, CardieeError> {
        if !paths.database.exists() {
            return Err(CardieeError::NotInitialized(paths.database.clone()));
        }
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, CardieeError> {
        log::debug!("Opening database at {}", path.display());
        let conn = Connection::open(path).map_err(|e| {
            CardieeError::Storage(format!("Failed to open database {}: {e}", path.display()))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, CardieeError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            CardieeError::Storage(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Run database migrations.
    fn migrate(&self) -> Result<(), CardieeError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, CardieeError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
