//! Generic repository over SQLite
//!
//! `SqliteDataLayer` owns the connection recipe; `GenericRepository<E>`
//! layers the metadata-driven CRUD surface on top of it for one entity
//! type. Filters beyond primary-key and single-field lookups go through
//! the structured `Predicate` builder.

mod data_layer;
mod generic;
mod predicate;

pub use data_layer::SqliteDataLayer;
pub use generic::GenericRepository;
pub use predicate::{Op, Predicate};
