//! Database migrations for cardiee.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::CardieeError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, CardieeError> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| CardieeError::Storage(format!("Failed to get schema version: {e}")))?;

    Ok(version)
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), CardieeError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| CardieeError::Storage(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), CardieeError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        log::debug!("Applying schema migration v{version}");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), CardieeError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(CardieeError::Storage(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// `deadline` is a `YYYY-MM-DD` date so that plain string comparison orders
/// it correctly. Timestamps are RFC 3339.
fn migrate_v1(conn: &Connection) -> Result<(), CardieeError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            deadline TEXT NOT NULL,
            growth_factor INTEGER NOT NULL DEFAULT 1 CHECK (growth_factor >= 1),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_cards_deadline
        ON cards(deadline);
        ",
    )
    .map_err(|e| CardieeError::Storage(format!("Migration v1 failed: {e}")))
}
