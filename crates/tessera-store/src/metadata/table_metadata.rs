//! Per-type table metadata
//!
//! A pure function of the entity's schema descriptor: deriving it twice
//! yields an equivalent result, which is what makes the cache's benign
//! first-access race safe.

#![allow(clippy::result_large_err)]

use crate::errors::{schema_error, Result};
use crate::metadata::sql;
use tessera_core::{ColumnDef, EntityDescriptor};

/// Derived schema for one entity type: column layout plus the four
/// canonical SQL templates. Never mutated after creation.
#[derive(Debug)]
pub struct TableMetadata {
    pub table: &'static str,
    /// Mapped columns, in declaration order
    pub columns: Vec<&'static ColumnDef>,
    /// Columns forming the key; non-empty, single or compound
    pub primary_key: Vec<&'static ColumnDef>,
    /// Columns whose values are assigned by the storage engine
    pub generated: Vec<&'static ColumnDef>,
    /// Exactly one primary-key column is database-generated
    pub pk_auto_generated: bool,
    pub select_sql: String,
    pub insert_sql: String,
    pub update_sql: String,
    pub delete_sql: String,
}

impl TableMetadata {
    /// Columns bound on insert: everything mapped except generated ones.
    pub fn insertable_columns(&self) -> Vec<&'static ColumnDef> {
        self.columns
            .iter()
            .filter(|c| !c.generated)
            .copied()
            .collect()
    }

    /// Generated columns that are not part of the primary key; these are
    /// backfilled from a re-select after insert.
    pub fn non_key_generated_columns(&self) -> Vec<&'static ColumnDef> {
        self.generated
            .iter()
            .filter(|c| !c.primary_key)
            .copied()
            .collect()
    }

    /// The single auto-generated key column, when `pk_auto_generated`.
    pub fn generated_key_column(&self) -> Option<&'static ColumnDef> {
        if self.pk_auto_generated {
            self.primary_key.iter().find(|c| c.generated).copied()
        } else {
            None
        }
    }
}

/// Derive metadata from a descriptor.
///
/// Fails when the descriptor declares no table name, no primary-key
/// column, or more than one auto-generated primary-key column.
pub(crate) fn derive_metadata(descriptor: &'static EntityDescriptor) -> Result<TableMetadata> {
    let table = descriptor.table;
    if table.trim().is_empty() {
        return Err(schema_error(
            table,
            "entity must declare a table name",
        ));
    }

    let columns: Vec<&'static ColumnDef> =
        descriptor.columns.iter().filter(|c| c.mapped).collect();

    let primary_key: Vec<&'static ColumnDef> =
        columns.iter().filter(|c| c.primary_key).copied().collect();
    if primary_key.is_empty() {
        return Err(schema_error(
            table,
            "entity must declare at least one primary-key column",
        ));
    }

    let generated: Vec<&'static ColumnDef> =
        columns.iter().filter(|c| c.generated).copied().collect();

    let generated_key_count = primary_key.iter().filter(|c| c.generated).count();
    if generated_key_count > 1 {
        return Err(schema_error(
            table,
            "auto-generated compound primary keys are not supported",
        ));
    }
    let pk_auto_generated = generated_key_count == 1;

    let non_key: Vec<&'static ColumnDef> = columns
        .iter()
        .filter(|c| !c.primary_key)
        .copied()
        .collect();
    let insertable: Vec<&'static ColumnDef> =
        columns.iter().filter(|c| !c.generated).copied().collect();

    let select_sql = sql::select_template(table, &columns);
    let insert_sql = sql::insert_template(table, &insertable);
    let update_sql = sql::update_template(table, &non_key, &primary_key);
    let delete_sql = sql::delete_template(table, &primary_key);

    Ok(TableMetadata {
        table,
        columns,
        primary_key,
        generated,
        pk_auto_generated,
        select_sql,
        insert_sql,
        update_sql,
        delete_sql,
    })
}
