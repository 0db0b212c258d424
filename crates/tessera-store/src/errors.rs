//! Error handling for tessera-store
//!
//! One taxonomy for the whole data path. Errors surface to the caller
//! uncaught: the store performs no retries and no silent recovery.

#![allow(clippy::result_large_err)]

use thiserror::Error;

/// Result type alias using DataError
pub type Result<T> = std::result::Result<T, DataError>;

/// Data-path error taxonomy.
#[derive(Error, Debug)]
pub enum DataError {
    /// The entity's schema declaration is unusable (missing table name,
    /// missing primary key, compound auto-generated key).
    #[error("Schema error for [{table}]: {reason}")]
    Schema { table: String, reason: String },

    /// A caller-supplied argument is blank, absent, or mismatched.
    #[error("Invalid argument: {reason}")]
    Argument { reason: String },

    /// A generated value must be written back but the target field is
    /// read only or has no registered accessor.
    #[error("Entity [{table}] field [{column}] is read only or missing and cannot be updated")]
    ImmutableField { table: String, column: String },

    /// A row that must exist (post-update re-select) was not found.
    #[error("Record not found in [{table}] after upsert")]
    NotFound { table: String },

    /// A stored scalar could not be coerced to the declared column type.
    #[error("Cannot convert stored value for column [{column}]: {reason}")]
    Conversion { column: String, reason: String },

    /// Engine/driver failure, propagated directly.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A blocking worker failed to join.
    #[error("blocking task failed: {0}")]
    Task(String),
}

impl DataError {
    /// Stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            DataError::Schema { .. } => "ERR_SCHEMA",
            DataError::Argument { .. } => "ERR_ARGUMENT",
            DataError::ImmutableField { .. } => "ERR_IMMUTABLE_FIELD",
            DataError::NotFound { .. } => "ERR_NOT_FOUND",
            DataError::Conversion { .. } => "ERR_CONVERSION",
            DataError::Sqlite(_) => "ERR_SQLITE",
            DataError::Task(_) => "ERR_TASK",
        }
    }
}

/// Create a schema declaration error
pub fn schema_error(table: &str, reason: impl Into<String>) -> DataError {
    DataError::Schema {
        table: table.to_string(),
        reason: reason.into(),
    }
}

/// Create an invalid-argument error
pub fn argument_error(reason: impl Into<String>) -> DataError {
    DataError::Argument {
        reason: reason.into(),
    }
}

/// Create a read-only/missing-field error
pub fn immutable_field(table: &str, column: &str) -> DataError {
    DataError::ImmutableField {
        table: table.to_string(),
        column: column.to_string(),
    }
}

/// Create a missing-row error
pub fn not_found(table: &str) -> DataError {
    DataError::NotFound {
        table: table.to_string(),
    }
}

/// Create a value-coercion error
pub fn conversion_error(column: &str, reason: impl Into<String>) -> DataError {
    DataError::Conversion {
        column: column.to_string(),
        reason: reason.into(),
    }
}
