//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections.
//! Connections are short-lived: the repository opens one per call and
//! disposes it at call end; pooling, if any, belongs to the driver.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Ok(Connection::open(path)?)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Ok(Connection::open_in_memory()?)
}

/// Configure a connection with standard settings
pub fn configure(conn: &Connection) -> Result<()> {
    // Enable foreign keys
    conn.pragma_update(None, "foreign_keys", "ON")?;

    // Set WAL mode for better concurrency
    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(())
}
