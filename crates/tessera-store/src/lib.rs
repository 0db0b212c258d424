//! Metadata-driven SQLite data access
//!
//! Entities declare a static schema descriptor and accessor table; this
//! crate derives per-type SQL templates once, caches them for the life
//! of the process, and exposes an async CRUD repository over them.
//!
//! ```no_run
//! use tessera_store::{GenericRepository, Predicate, Op};
//! use tessera_core::{ColumnDef, ColumnType, Entity, EntityDescriptor, FieldAccessor, Value};
//!
//! #[derive(Debug, Default, Clone)]
//! struct Track {
//!     id: i64,
//!     title: String,
//! }
//!
//! static TRACK: EntityDescriptor = EntityDescriptor {
//!     table: "tracks",
//!     columns: &[
//!         ColumnDef::new("id", ColumnType::Integer).primary_key().generated(),
//!         ColumnDef::new("title", ColumnType::Text),
//!     ],
//! };
//!
//! impl Entity for Track {
//!     fn descriptor() -> &'static EntityDescriptor {
//!         &TRACK
//!     }
//!
//!     fn accessors() -> &'static [FieldAccessor<Self>] {
//!         &[
//!             FieldAccessor {
//!                 column: "id",
//!                 get: |e| Value::Integer(e.id),
//!                 set: Some(|e, v| {
//!                     if let Value::Integer(i) = v {
//!                         e.id = i;
//!                     }
//!                 }),
//!             },
//!             FieldAccessor {
//!                 column: "title",
//!                 get: |e| Value::Text(e.title.clone()),
//!                 set: Some(|e, v| {
//!                     if let Value::Text(t) = v {
//!                         e.title = t;
//!                     }
//!                 }),
//!             },
//!         ]
//!     }
//! }
//!
//! # async fn demo() -> tessera_store::Result<()> {
//! let repo: GenericRepository<Track> = GenericRepository::open("music.db")?;
//! let stored = repo.insert(Track { id: 0, title: "Holiday".into() }).await?;
//! let liked = repo.select_where(&Predicate::field("title", Op::Like, "Holi%")).await?;
//! # let _ = (stored, liked);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::result_large_err)]

pub mod db;
pub mod errors;
pub mod metadata;
pub mod repo;

mod mapper;

pub use errors::{DataError, Result};
pub use metadata::{table_metadata, TableMetadata};
pub use repo::{GenericRepository, Op, Predicate, SqliteDataLayer};
