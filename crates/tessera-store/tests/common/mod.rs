use chrono::{DateTime, Utc};
use tempfile::TempDir;
use tessera_core::{ColumnDef, ColumnType, Entity, EntityDescriptor, FieldAccessor, Value};
use tessera_store::{GenericRepository, SqliteDataLayer};

/// Music track with an auto-generated key and a database-assigned
/// timestamp column.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Track {
    pub id: i64,
    pub title: String,
    pub liked: bool,
    pub added_at: Option<DateTime<Utc>>,
}

static TRACK_DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    table: "tracks",
    columns: &[
        ColumnDef::new("id", ColumnType::Integer)
            .primary_key()
            .generated(),
        ColumnDef::new("title", ColumnType::Text),
        ColumnDef::new("liked", ColumnType::Bool),
        ColumnDef::new("added_at", ColumnType::Timestamp).generated(),
    ],
};

impl Entity for Track {
    fn descriptor() -> &'static EntityDescriptor {
        &TRACK_DESCRIPTOR
    }

    fn accessors() -> &'static [FieldAccessor<Self>] {
        &[
            FieldAccessor {
                column: "id",
                get: |e| Value::Integer(e.id),
                set: Some(|e, v| {
                    if let Value::Integer(i) = v {
                        e.id = i;
                    }
                }),
            },
            FieldAccessor {
                column: "title",
                get: |e| Value::Text(e.title.clone()),
                set: Some(|e, v| {
                    if let Value::Text(t) = v {
                        e.title = t;
                    }
                }),
            },
            FieldAccessor {
                column: "liked",
                get: |e| Value::Bool(e.liked),
                set: Some(|e, v| {
                    if let Value::Bool(b) = v {
                        e.liked = b;
                    }
                }),
            },
            FieldAccessor {
                column: "added_at",
                get: |e| e.added_at.into(),
                set: Some(|e, v| {
                    if let Value::Timestamp(ts) = v {
                        e.added_at = Some(ts);
                    }
                }),
            },
        ]
    }
}

/// Playlist membership row with a compound primary key.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlaylistEntry {
    pub playlist_id: i64,
    pub track_id: i64,
    pub position: i64,
}

static PLAYLIST_ENTRY_DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    table: "playlist_entries",
    columns: &[
        ColumnDef::new("playlist_id", ColumnType::Integer).primary_key(),
        ColumnDef::new("track_id", ColumnType::Integer).primary_key(),
        ColumnDef::new("position", ColumnType::Integer),
    ],
};

impl Entity for PlaylistEntry {
    fn descriptor() -> &'static EntityDescriptor {
        &PLAYLIST_ENTRY_DESCRIPTOR
    }

    fn accessors() -> &'static [FieldAccessor<Self>] {
        &[
            FieldAccessor {
                column: "playlist_id",
                get: |e| Value::Integer(e.playlist_id),
                set: Some(|e, v| {
                    if let Value::Integer(i) = v {
                        e.playlist_id = i;
                    }
                }),
            },
            FieldAccessor {
                column: "track_id",
                get: |e| Value::Integer(e.track_id),
                set: Some(|e, v| {
                    if let Value::Integer(i) = v {
                        e.track_id = i;
                    }
                }),
            },
            FieldAccessor {
                column: "position",
                get: |e| Value::Integer(e.position),
                set: Some(|e, v| {
                    if let Value::Integer(i) = v {
                        e.position = i;
                    }
                }),
            },
        ]
    }
}

/// Entity whose database-assigned `etag` has no setter; inserting it
/// must fail when the backfill tries to write the field back.
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    pub id: i64,
    pub payload: String,
    pub etag: i64,
}

static SNAPSHOT_DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    table: "snapshots",
    columns: &[
        ColumnDef::new("id", ColumnType::Integer)
            .primary_key()
            .generated(),
        ColumnDef::new("payload", ColumnType::Text),
        ColumnDef::new("etag", ColumnType::Integer).generated(),
    ],
};

impl Entity for Snapshot {
    fn descriptor() -> &'static EntityDescriptor {
        &SNAPSHOT_DESCRIPTOR
    }

    fn accessors() -> &'static [FieldAccessor<Self>] {
        &[
            FieldAccessor {
                column: "id",
                get: |e| Value::Integer(e.id),
                set: Some(|e, v| {
                    if let Value::Integer(i) = v {
                        e.id = i;
                    }
                }),
            },
            FieldAccessor {
                column: "payload",
                get: |e| Value::Text(e.payload.clone()),
                set: Some(|e, v| {
                    if let Value::Text(t) = v {
                        e.payload = t;
                    }
                }),
            },
            FieldAccessor {
                column: "etag",
                get: |e| Value::Integer(e.etag),
                // Read only: no setter registered
                set: None,
            },
        ]
    }
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tracks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    liked INTEGER NOT NULL DEFAULT 0,
    added_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS playlist_entries (
    playlist_id INTEGER NOT NULL,
    track_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    PRIMARY KEY (playlist_id, track_id)
);

CREATE TABLE IF NOT EXISTS snapshots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    payload TEXT NOT NULL,
    etag INTEGER NOT NULL DEFAULT 7
);
";

/// Create a fresh file-backed database with the test schema applied.
///
/// Keep the returned TempDir alive for the duration of the test; the
/// database file lives inside it.
#[allow(dead_code)]
pub async fn fresh_layer() -> (TempDir, SqliteDataLayer) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("store.db");
    let layer = SqliteDataLayer::new(path.to_str().expect("utf-8 path")).expect("create layer");
    layer.execute_script(SCHEMA).await.expect("apply schema");
    (dir, layer)
}

#[allow(dead_code)]
pub async fn repo<E: Entity>() -> (TempDir, GenericRepository<E>) {
    let (dir, layer) = fresh_layer().await;
    (dir, GenericRepository::new(layer))
}
