//! Schema metadata derivation and memoization
//!
//! Derives one `TableMetadata` per entity type from its descriptor and
//! caches it for the life of the process.

mod cache;
mod sql;
mod table_metadata;

pub use cache::table_metadata;
pub use table_metadata::TableMetadata;
