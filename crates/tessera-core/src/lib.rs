//! Tessera Core - Schema descriptor contract and shared value model
//!
//! This crate provides the foundational types for the Tessera data layer:
//! - `Value`, the driver-neutral scalar carried between entities and storage
//! - `EntityDescriptor` / `ColumnDef`, the compile-time schema declaration
//! - `Entity`, the trait binding a Rust type to its table and field accessors
//! - Pure helpers (elapsed-time formatting, IPv4 classification, task timing)
//!
//! It deliberately has no database dependency: driver bridging lives in
//! `tessera-store`.

pub mod elapsed;
pub mod entity;
pub mod net;
pub mod timing;
pub mod value;

// Re-export commonly used types
pub use entity::{ColumnDef, ColumnType, Entity, EntityDescriptor, FieldAccessor};
pub use value::Value;
