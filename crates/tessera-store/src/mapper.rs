//! Entity binder and row materializer
//!
//! Bridges the driver-neutral `Value` model to rusqlite: binds entity
//! fields as named parameters, and writes result rows back into entities
//! with explicit coercion for boolean and temporal scalars.

#![allow(clippy::result_large_err)]

use crate::errors::{conversion_error, immutable_field, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, ToSql};
use tessera_core::{ColumnDef, ColumnType, Entity, Value};

/// ToSql bridge for `Value`. Bool is stored as integer 0/1, Timestamp as
/// RFC3339 text. (A wrapper because both trait and type are foreign.)
pub(crate) struct SqlParam<'a>(pub &'a Value);

impl ToSql for SqlParam<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use rusqlite::types::Value as SqliteValue;

        let out = match self.0 {
            Value::Null => ToSqlOutput::Owned(SqliteValue::Null),
            Value::Integer(i) => ToSqlOutput::Owned(SqliteValue::Integer(*i)),
            Value::Real(r) => ToSqlOutput::Owned(SqliteValue::Real(*r)),
            Value::Text(t) => ToSqlOutput::Borrowed(ValueRef::Text(t.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
            Value::Bool(b) => ToSqlOutput::Owned(SqliteValue::Integer(i64::from(*b))),
            Value::Timestamp(ts) => ToSqlOutput::Owned(SqliteValue::Text(ts.to_rfc3339())),
        };
        Ok(out)
    }
}

/// Read one entity field through its accessor.
///
/// A column with no registered accessor cannot be located and is an
/// `ImmutableField` error.
pub(crate) fn read_field<E: Entity>(entity: &E, table: &str, column: &str) -> Result<Value> {
    let accessor = E::accessors()
        .iter()
        .find(|a| a.column == column)
        .ok_or_else(|| immutable_field(table, column))?;

    Ok((accessor.get)(entity))
}

/// Write one entity field through its accessor; `ImmutableField` when the
/// field is read only or has no accessor.
pub(crate) fn write_field<E: Entity>(
    entity: &mut E,
    table: &str,
    column: &str,
    value: Value,
) -> Result<()> {
    let accessor = E::accessors()
        .iter()
        .find(|a| a.column == column)
        .ok_or_else(|| immutable_field(table, column))?;
    let set = accessor.set.ok_or_else(|| immutable_field(table, column))?;

    set(entity, value);
    Ok(())
}

/// Bind the given columns of an entity as named parameters (`:name`).
pub(crate) fn bind_columns<E: Entity>(
    entity: &E,
    table: &str,
    columns: &[&'static ColumnDef],
) -> Result<Vec<(String, Value)>> {
    let mut bound = Vec::with_capacity(columns.len());
    for column in columns {
        let value = read_field(entity, table, column.name)?;
        bound.push((format!(":{}", column.name), value));
    }
    Ok(bound)
}

fn as_params<'a>(bound: &'a [(String, Value)], wrapped: &'a [SqlParam<'a>]) -> Vec<(&'a str, &'a dyn ToSql)> {
    bound
        .iter()
        .zip(wrapped.iter())
        .map(|((name, _), param)| (name.as_str(), param as &dyn ToSql))
        .collect()
}

/// Execute a non-query statement with named parameters; returns the
/// affected row count.
pub(crate) fn execute_named(
    conn: &Connection,
    sql: &str,
    bound: &[(String, Value)],
) -> Result<usize> {
    let wrapped: Vec<SqlParam> = bound.iter().map(|(_, v)| SqlParam(v)).collect();
    let params = as_params(bound, &wrapped);

    Ok(conn.execute(sql, params.as_slice())?)
}

/// Query a single integer scalar, e.g. a COUNT.
pub(crate) fn query_scalar_i64(
    conn: &Connection,
    sql: &str,
    bound: &[(String, Value)],
) -> Result<i64> {
    let wrapped: Vec<SqlParam> = bound.iter().map(|(_, v)| SqlParam(v)).collect();
    let params = as_params(bound, &wrapped);

    Ok(conn.query_row(sql, params.as_slice(), |row| row.get(0))?)
}

/// Whether the query yields at least one row.
pub(crate) fn query_exists(
    conn: &Connection,
    sql: &str,
    bound: &[(String, Value)],
) -> Result<bool> {
    use rusqlite::OptionalExtension;

    let wrapped: Vec<SqlParam> = bound.iter().map(|(_, v)| SqlParam(v)).collect();
    let params = as_params(bound, &wrapped);

    let hit = conn.query_row(sql, params.as_slice(), |_| Ok(())).optional()?;
    Ok(hit.is_some())
}

/// Run a select with named parameters and materialize every row.
pub(crate) fn query_entities<E: Entity>(
    conn: &Connection,
    sql: &str,
    bound: &[(String, Value)],
    columns: &[&'static ColumnDef],
    table: &str,
) -> Result<Vec<E>> {
    let wrapped: Vec<SqlParam> = bound.iter().map(|(_, v)| SqlParam(v)).collect();
    let params = as_params(bound, &wrapped);

    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params.as_slice())?;

    let mut entities = Vec::new();
    while let Some(row) = rows.next()? {
        let mut entity = E::default();
        for column in columns {
            let stored = row.get_ref(column.name)?;
            match coerce(column, stored)? {
                // Null stored values leave the field at its default
                Value::Null => {}
                value => write_field(&mut entity, table, column.name, value)?,
            }
        }
        entities.push(entity);
    }

    Ok(entities)
}

/// Coerce a stored scalar to the column's declared type.
///
/// Booleans and timestamps come back as generic integers/text and need
/// explicit conversion; everything else is carried through directly.
fn coerce(column: &ColumnDef, stored: ValueRef<'_>) -> Result<Value> {
    let value = match (column.ty, stored) {
        (_, ValueRef::Null) => Value::Null,
        (ColumnType::Bool, ValueRef::Integer(i)) => Value::Bool(i != 0),
        (ColumnType::Bool, ValueRef::Text(t)) => {
            let text = text_utf8(column.name, t)?;
            Value::Bool(text == "1" || text.eq_ignore_ascii_case("true"))
        }
        (ColumnType::Timestamp, ValueRef::Text(t)) => {
            Value::Timestamp(parse_timestamp(column.name, text_utf8(column.name, t)?)?)
        }
        (ColumnType::Timestamp, ValueRef::Integer(i)) => Value::Timestamp(
            DateTime::from_timestamp(i, 0)
                .ok_or_else(|| conversion_error(column.name, "epoch seconds out of range"))?,
        ),
        (_, ValueRef::Integer(i)) => Value::Integer(i),
        (_, ValueRef::Real(r)) => Value::Real(r),
        (_, ValueRef::Text(t)) => Value::Text(text_utf8(column.name, t)?.to_string()),
        (_, ValueRef::Blob(b)) => Value::Blob(b.to_vec()),
    };
    Ok(value)
}

fn text_utf8<'a>(column: &str, bytes: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| conversion_error(column, e.to_string()))
}

fn parse_timestamp(column: &str, text: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    // SQLite's datetime('now') format
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .map(|n| n.and_utc())
        .map_err(|e| conversion_error(column, e.to_string()))
}
