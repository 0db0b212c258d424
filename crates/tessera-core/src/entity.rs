//! Schema descriptor contract
//!
//! An entity type declares its table binding once, as a const
//! `EntityDescriptor` plus a field-accessor table. The store derives all
//! SQL from this declaration; there is no runtime inspection of the type.

use crate::value::Value;

/// Storage type hint for a column.
///
/// The storage engine returns temporal and boolean values as generic
/// scalars; the hint tells the mapper which explicit coercion to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Blob,
    Bool,
    Timestamp,
}

/// Declaration of a single column.
///
/// Built with the const methods so descriptors can live in statics:
///
/// ```
/// use tessera_core::{ColumnDef, ColumnType};
///
/// const ID: ColumnDef = ColumnDef::new("id", ColumnType::Integer)
///     .primary_key()
///     .generated();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    /// Part of the table's primary key
    pub primary_key: bool,
    /// Value assigned by the storage engine, not the caller
    pub generated: bool,
    /// Unmapped columns are excluded from all derived SQL
    pub mapped: bool,
}

impl ColumnDef {
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            primary_key: false,
            generated: false,
            mapped: true,
        }
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub const fn generated(mut self) -> Self {
        self.generated = true;
        self
    }

    pub const fn unmapped(mut self) -> Self {
        self.mapped = false;
        self
    }
}

/// Per-type table declaration: table name and ordered column list.
#[derive(Debug, Clone, Copy)]
pub struct EntityDescriptor {
    pub table: &'static str,
    pub columns: &'static [ColumnDef],
}

/// Get/set function pair binding one column to one entity field.
///
/// `set: None` models a read-only field; writing a database-generated
/// value back through it is an error surfaced by the repository.
pub struct FieldAccessor<E> {
    pub column: &'static str,
    pub get: fn(&E) -> Value,
    pub set: Option<fn(&mut E, Value)>,
}

/// A value whose fields map 1:1 to the columns of a table.
///
/// Implementations are expected to be hand-written or generated; the
/// descriptor and accessor table must agree on column names.
pub trait Entity: Default + Clone + Send + Sync + 'static {
    fn descriptor() -> &'static EntityDescriptor;
    fn accessors() -> &'static [FieldAccessor<Self>];
}
