//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

use crate::config::{JournalMode, StoreConfig};
use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Open the database a configuration points at, configured
pub fn open_configured(config: &StoreConfig) -> Result<Connection> {
    let conn = if config.is_in_memory() {
        open_in_memory()?
    } else {
        open(&config.database)?
    };
    configure(&conn, config.foreign_keys, config.journal_mode)?;
    Ok(conn)
}

/// Configure a connection with the given pragmas
///
/// In-memory databases keep `memory` journaling whatever mode is requested.
pub fn configure(conn: &Connection, foreign_keys: bool, journal_mode: JournalMode) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", foreign_keys)
        .map_err(from_rusqlite)?;

    // journal_mode answers with the mode in effect
    let applied: String = conn
        .pragma_update_and_check(None, "journal_mode", journal_mode.as_pragma(), |row| {
            row.get(0)
        })
        .map_err(from_rusqlite)?;

    tracing::debug!(
        foreign_keys,
        requested = journal_mode.as_pragma(),
        applied = %applied,
        "configured sqlite connection"
    );
    Ok(())
}
