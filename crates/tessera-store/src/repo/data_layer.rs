//! SQLite data layer
//!
//! Holds the database location and opens a fresh configured connection
//! per operation. Cloning is cheap; clones target the same database.

#![allow(clippy::result_large_err)]

use crate::db;
use crate::errors::{argument_error, DataError, Result};
use rusqlite::Connection;
use std::sync::Arc;

/// Connection recipe for one SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteDataLayer {
    database_path: Arc<str>,
}

impl SqliteDataLayer {
    /// Create a data layer for the database at `database_path`.
    pub fn new(database_path: &str) -> Result<Self> {
        if database_path.trim().is_empty() {
            return Err(argument_error("database path must not be blank"));
        }
        Ok(Self {
            database_path: Arc::from(database_path),
        })
    }

    pub fn database_path(&self) -> &str {
        &self.database_path
    }

    /// Open a fresh connection with foreign keys and WAL enabled.
    pub(crate) fn open_connection(&self) -> Result<Connection> {
        let conn = db::open(self.database_path())?;
        db::configure(&conn)?;
        Ok(conn)
    }

    /// Run a multi-statement SQL script, e.g. schema setup.
    pub async fn execute_script(&self, script: &str) -> Result<()> {
        if script.trim().is_empty() {
            return Err(argument_error("script must not be blank"));
        }

        let layer = self.clone();
        let script = script.to_string();
        run_blocking(move || {
            let conn = layer.open_connection()?;
            conn.execute_batch(&script)?;
            Ok(())
        })
        .await
    }
}

/// Run a closure of blocking database work off the async executor.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| DataError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_path_is_rejected() {
        let err = SqliteDataLayer::new("  ").unwrap_err();
        assert_eq!(err.code(), "ERR_ARGUMENT");
    }

    #[tokio::test]
    async fn test_execute_script_creates_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layer.db");
        let layer = SqliteDataLayer::new(path.to_str().unwrap()).unwrap();

        layer
            .execute_script("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT);")
            .await
            .unwrap();

        let conn = layer.open_connection().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'notes'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_blank_script_is_rejected() {
        let layer = SqliteDataLayer::new("unused.db").unwrap();
        let err = layer.execute_script("").await.unwrap_err();
        assert_eq!(err.code(), "ERR_ARGUMENT");
    }
}
