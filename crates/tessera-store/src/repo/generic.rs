//! Metadata-driven CRUD for one entity type
//!
//! Every operation opens a fresh connection, runs its blocking database
//! work off the async executor, and maps rows through the entity's
//! accessor table. Statement shapes come from the cached `TableMetadata`
//! templates; per-call filters are appended as named-parameter WHERE
//! clauses.

#![allow(clippy::result_large_err)]

use crate::errors::{argument_error, not_found, Result};
use crate::mapper;
use crate::metadata::{table_metadata, TableMetadata};
use crate::repo::data_layer::{run_blocking, SqliteDataLayer};
use crate::repo::predicate::Predicate;
use rusqlite::Connection;
use std::marker::PhantomData;
use tessera_core::{Entity, Value};

/// Repository facade for entity type `E`.
#[derive(Debug)]
pub struct GenericRepository<E: Entity> {
    layer: SqliteDataLayer,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for GenericRepository<E> {
    fn clone(&self) -> Self {
        Self {
            layer: self.layer.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> GenericRepository<E> {
    pub fn new(layer: SqliteDataLayer) -> Self {
        Self {
            layer,
            _entity: PhantomData,
        }
    }

    /// Convenience constructor over a database path.
    pub fn open(database_path: &str) -> Result<Self> {
        Ok(Self::new(SqliteDataLayer::new(database_path)?))
    }

    pub fn data_layer(&self) -> &SqliteDataLayer {
        &self.layer
    }

    /// Fetch the single row matching the full primary key, in declaration
    /// order. `key` must carry exactly one value per key column.
    pub async fn select_by_primary_key(&self, key: &[Value]) -> Result<Option<E>> {
        let meta = table_metadata::<E>()?;
        if key.is_empty() || key.len() != meta.primary_key.len() {
            return Err(argument_error(format!(
                "expected {} primary-key value(s) for {}, got {}",
                meta.primary_key.len(),
                meta.table,
                key.len()
            )));
        }

        let fields: Vec<String> = meta.primary_key.iter().map(|c| c.name.to_string()).collect();
        let values = key.to_vec();
        let layer = self.layer.clone();
        run_blocking(move || {
            let conn = layer.open_connection()?;
            let mut rows = select_by_fields::<E>(&conn, &meta, &fields, &values)?;
            Ok(if rows.is_empty() {
                None
            } else {
                Some(rows.swap_remove(0))
            })
        })
        .await
    }

    /// Fetch the first row where `field = value`, or `None`. Blank field
    /// names and null values are rejected before any query runs.
    pub async fn select_by_field_value(&self, field: &str, value: Value) -> Result<Option<E>> {
        let mut rows = self.rows_by_field_value(field, value).await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    async fn rows_by_field_value(&self, field: &str, value: Value) -> Result<Vec<E>> {
        if field.trim().is_empty() {
            return Err(argument_error("field name must not be blank"));
        }
        if value.is_null() {
            return Err(argument_error(format!(
                "value for field '{}' must not be null",
                field
            )));
        }

        let meta = table_metadata::<E>()?;
        let fields = vec![field.to_string()];
        let layer = self.layer.clone();
        run_blocking(move || {
            let conn = layer.open_connection()?;
            select_by_fields::<E>(&conn, &meta, &fields, &[value])
        })
        .await
    }

    /// Fetch every row, optionally filtered by a single field equality.
    pub async fn select_data_by_field_value(
        &self,
        filter: Option<(&str, Value)>,
    ) -> Result<Vec<E>> {
        match filter {
            Some((field, value)) => self.rows_by_field_value(field, value).await,
            None => {
                let meta = table_metadata::<E>()?;
                let layer = self.layer.clone();
                run_blocking(move || {
                    let conn = layer.open_connection()?;
                    mapper::query_entities::<E>(
                        &conn,
                        &meta.select_sql,
                        &[],
                        &meta.columns,
                        meta.table,
                    )
                })
                .await
            }
        }
    }

    /// Fetch every row matching a structured predicate.
    pub async fn select_where(&self, predicate: &Predicate) -> Result<Vec<E>> {
        let meta = table_metadata::<E>()?;
        let (fragment, bound) = predicate.to_sql()?;
        let sql = format!("{} WHERE {}", meta.select_sql, fragment);

        let layer = self.layer.clone();
        run_blocking(move || {
            let conn = layer.open_connection()?;
            mapper::query_entities::<E>(&conn, &sql, &bound, &meta.columns, meta.table)
        })
        .await
    }

    /// Insert the entity and return it with database-assigned values
    /// filled in.
    ///
    /// Runs in a transaction: the insert, the rowid write-back for an
    /// auto-generated key, and the re-select that backfills other
    /// generated columns either all land or none do.
    pub async fn insert(&self, entity: E) -> Result<E> {
        let meta = table_metadata::<E>()?;
        let layer = self.layer.clone();

        run_blocking(move || {
            let mut conn = layer.open_connection()?;
            let tx = conn.transaction()?;
            let entity = insert_in_tx(&tx, &meta, entity)?;
            tx.commit()?;
            tracing::debug!(table = meta.table, "inserted row");
            Ok(entity)
        })
        .await
    }

    /// Update the row matching the entity's key, or insert it when no
    /// such row exists. Returns the stored entity.
    pub async fn upsert(&self, entity: E) -> Result<E> {
        let meta = table_metadata::<E>()?;
        let layer = self.layer.clone();

        run_blocking(move || {
            let mut conn = layer.open_connection()?;

            let bound = mapper::bind_columns(&entity, meta.table, &meta.columns)?;
            let affected = mapper::execute_named(&conn, &meta.update_sql, &bound)?;
            if affected == 0 {
                let tx = conn.transaction()?;
                let entity = insert_in_tx(&tx, &meta, entity)?;
                tx.commit()?;
                tracing::debug!(table = meta.table, "upsert inserted row");
                return Ok(entity);
            }

            // Updated: re-read by the full key so generated columns
            // reflect what the database now holds.
            let (fields, values) = primary_key_bindings(&meta, &entity)?;
            let mut rows = select_by_fields::<E>(&conn, &meta, &fields, &values)?;
            if rows.is_empty() {
                return Err(not_found(meta.table));
            }
            tracing::debug!(table = meta.table, "upsert updated row");
            Ok(rows.swap_remove(0))
        })
        .await
    }

    /// Update every non-key column of the row matching the entity's key.
    /// Returns the affected row count.
    pub async fn update(&self, entity: &E) -> Result<usize> {
        let meta = table_metadata::<E>()?;
        let bound = mapper::bind_columns(entity, meta.table, &meta.columns)?;

        let layer = self.layer.clone();
        run_blocking(move || {
            let conn = layer.open_connection()?;
            let affected = mapper::execute_named(&conn, &meta.update_sql, &bound)?;
            tracing::debug!(table = meta.table, affected, "updated rows");
            Ok(affected)
        })
        .await
    }

    /// Delete the row matching the entity's key. Returns the affected
    /// row count.
    pub async fn delete(&self, entity: &E) -> Result<usize> {
        let meta = table_metadata::<E>()?;
        let bound = mapper::bind_columns(entity, meta.table, &meta.primary_key)?;

        let layer = self.layer.clone();
        run_blocking(move || {
            let conn = layer.open_connection()?;
            let affected = mapper::execute_named(&conn, &meta.delete_sql, &bound)?;
            tracing::debug!(table = meta.table, affected, "deleted rows");
            Ok(affected)
        })
        .await
    }

    /// Count rows, optionally restricted by a predicate.
    pub async fn count(&self, predicate: Option<&Predicate>) -> Result<i64> {
        let meta = table_metadata::<E>()?;
        let (filter, bound) = optional_filter(predicate)?;
        let sql = format!("SELECT COUNT(*) FROM {}{}", meta.table, filter);

        let layer = self.layer.clone();
        run_blocking(move || {
            let conn = layer.open_connection()?;
            mapper::query_scalar_i64(&conn, &sql, &bound)
        })
        .await
    }

    /// Whether any row matches, optionally restricted by a predicate.
    pub async fn any(&self, predicate: Option<&Predicate>) -> Result<bool> {
        let meta = table_metadata::<E>()?;
        let (filter, bound) = optional_filter(predicate)?;
        let probe = meta.primary_key[0].name;
        let sql = format!("SELECT {} FROM {}{} LIMIT 1", probe, meta.table, filter);

        let layer = self.layer.clone();
        run_blocking(move || {
            let conn = layer.open_connection()?;
            mapper::query_exists(&conn, &sql, &bound)
        })
        .await
    }
}

fn optional_filter(predicate: Option<&Predicate>) -> Result<(String, Vec<(String, Value)>)> {
    match predicate {
        Some(p) => {
            let (fragment, bound) = p.to_sql()?;
            Ok((format!(" WHERE {}", fragment), bound))
        }
        None => Ok((String::new(), Vec::new())),
    }
}

/// Collect every primary-key column name and its current entity value.
fn primary_key_bindings<E: Entity>(
    meta: &TableMetadata,
    entity: &E,
) -> Result<(Vec<String>, Vec<Value>)> {
    let mut fields = Vec::with_capacity(meta.primary_key.len());
    let mut values = Vec::with_capacity(meta.primary_key.len());
    for column in &meta.primary_key {
        fields.push(column.name.to_string());
        values.push(mapper::read_field(entity, meta.table, column.name)?);
    }
    Ok((fields, values))
}

/// Insert within an open transaction and backfill generated values.
fn insert_in_tx<E: Entity>(
    tx: &rusqlite::Transaction<'_>,
    meta: &TableMetadata,
    mut entity: E,
) -> Result<E> {
    let insertable = meta.insertable_columns();
    let bound = mapper::bind_columns(&entity, meta.table, &insertable)?;
    mapper::execute_named(tx, &meta.insert_sql, &bound)?;

    if let Some(key_column) = meta.generated_key_column() {
        let rowid = tx.last_insert_rowid();
        mapper::write_field(&mut entity, meta.table, key_column.name, Value::Integer(rowid))?;
    }

    let backfill = meta.non_key_generated_columns();
    if !backfill.is_empty() {
        let (fields, values) = primary_key_bindings(meta, &entity)?;
        let mut rows = select_by_fields::<E>(tx, meta, &fields, &values)?;
        if rows.is_empty() {
            return Err(not_found(meta.table));
        }
        let stored = rows.swap_remove(0);
        for column in backfill {
            let value = mapper::read_field(&stored, meta.table, column.name)?;
            mapper::write_field(&mut entity, meta.table, column.name, value)?;
        }
    }

    Ok(entity)
}

/// Select rows where each named field equals its paired value. Arguments
/// are validated before any statement is prepared.
pub(crate) fn select_by_fields<E: Entity>(
    conn: &Connection,
    meta: &TableMetadata,
    fields: &[String],
    values: &[Value],
) -> Result<Vec<E>> {
    if fields.is_empty() {
        return Err(argument_error("at least one field filter is required"));
    }
    if fields.len() != values.len() {
        return Err(argument_error(format!(
            "field/value count mismatch: {} field(s), {} value(s)",
            fields.len(),
            values.len()
        )));
    }
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(argument_error("field name must not be blank"));
    }

    let clauses: Vec<String> = fields.iter().map(|f| format!("{} = :{}", f, f)).collect();
    let sql = format!("{} WHERE {}", meta.select_sql, clauses.join(" AND "));
    let bound: Vec<(String, Value)> = fields
        .iter()
        .zip(values.iter())
        .map(|(f, v)| (format!(":{}", f), v.clone()))
        .collect();

    mapper::query_entities::<E>(conn, &sql, &bound, &meta.columns, meta.table)
}
