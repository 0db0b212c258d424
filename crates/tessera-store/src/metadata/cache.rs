//! Process-wide metadata cache
//!
//! One `TableMetadata` per entity type, computed lazily on first access
//! and shared for the life of the process. Races on first access are
//! harmless: derivation is deterministic and effect-free, so concurrent
//! derivations compute the same value and the first publish wins.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use crate::metadata::table_metadata::{derive_metadata, TableMetadata};
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tessera_core::Entity;

static CACHE: Lazy<RwLock<HashMap<TypeId, Arc<TableMetadata>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Get the memoized metadata for `E`, deriving it on first access.
///
/// Fails with `DataError::Schema` when the descriptor declares no table
/// name, no primary-key column, or more than one auto-generated
/// primary-key column.
pub fn table_metadata<E: Entity>() -> Result<Arc<TableMetadata>> {
    let key = TypeId::of::<E>();

    {
        let cache = CACHE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(metadata) = cache.get(&key) {
            return Ok(Arc::clone(metadata));
        }
    }

    // Derive outside the write lock; duplicate concurrent derivations are
    // acceptable, insert-if-absent keeps a single published value.
    let derived = Arc::new(derive_metadata(E::descriptor())?);

    let mut cache = CACHE.write().unwrap_or_else(|e| e.into_inner());
    Ok(Arc::clone(cache.entry(key).or_insert(derived)))
}
