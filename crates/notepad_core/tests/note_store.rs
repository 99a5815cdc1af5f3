use notepad_core::db::migrations::latest_version;
use notepad_core::db::{open_db, open_db_in_memory, DbError};
use notepad_core::{NoteRecord, RemoteStore, SqliteNoteStore, StoreError};
use rusqlite::Connection;
use uuid::Uuid;

fn memory_store() -> SqliteNoteStore {
    SqliteNoteStore::try_new(open_db_in_memory().unwrap()).unwrap()
}

fn draft(title: &str, content: &str) -> NoteRecord {
    NoteRecord {
        title: title.to_string(),
        content: content.to_string(),
        ..NoteRecord::default()
    }
}

#[test]
fn open_db_in_memory_applies_notes_migration() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
    assert!(SqliteNoteStore::try_new(conn).is_ok());
}

#[test]
fn reopening_file_database_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    let mut store = SqliteNoteStore::try_new(open_db(&path).unwrap()).unwrap();
    store.insert_many(&[draft("kept", "body")]).unwrap();
    drop(store);

    let store = SqliteNoteStore::try_new(open_db(&path).unwrap()).unwrap();
    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].title, "kept");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_rejects_connection_without_notes_table() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteNoteStore::try_new(conn).err().expect("missing table");
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn insert_many_assigns_identity_and_timestamp_in_input_order() {
    let mut store = memory_store();
    let inserted = store
        .insert_many(&[draft("first", "1"), draft("second", "2")])
        .unwrap();

    assert_eq!(inserted.len(), 2);
    assert_eq!(inserted[0].title, "first");
    assert_eq!(inserted[1].title, "second");
    assert!(inserted.iter().all(|note| note.id.is_some()));
    assert!(inserted.iter().all(|note| note.created_at.unwrap_or(0) > 0));
    assert_ne!(inserted[0].id, inserted[1].id);
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn insert_many_rejects_records_with_identity() {
    let mut store = memory_store();
    let existing = NoteRecord::persisted(Uuid::new_v4(), "x", "y", 1);
    let err = store
        .insert_many(&[draft("ok", ""), existing])
        .unwrap_err();
    assert!(matches!(err, StoreError::UnexpectedIdentity { position: 1 }));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn upsert_many_updates_text_and_keeps_created_at() {
    let mut store = memory_store();
    let inserted = store.insert_many(&[draft("old", "old body")]).unwrap();
    let original = inserted[0].clone();

    let mut edited = original.with_draft("new", "new body");
    edited.created_at = Some(1);
    store.upsert_many(&[edited]).unwrap();

    let loaded = store.get(original.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.title, "new");
    assert_eq!(loaded.content, "new body");
    assert_eq!(loaded.created_at, original.created_at);
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn upsert_many_inserts_unknown_identity() {
    let mut store = memory_store();
    let id = Uuid::new_v4();
    store
        .upsert_many(&[NoteRecord::persisted(id, "remote", "", 42)])
        .unwrap();

    let loaded = store.get(id).unwrap().unwrap();
    assert_eq!(loaded.created_at, Some(42));
}

#[test]
fn upsert_many_rejects_records_without_identity() {
    let mut store = memory_store();
    let err = store.upsert_many(&[draft("fresh", "")]).unwrap_err();
    assert!(matches!(err, StoreError::MissingIdentity { position: 0 }));
}

#[test]
fn load_all_orders_newest_first() {
    let mut store = memory_store();
    let (older, newer) = (Uuid::new_v4(), Uuid::new_v4());
    store
        .upsert_many(&[
            NoteRecord::persisted(older, "older", "", 1_000),
            NoteRecord::persisted(newer, "newer", "", 2_000),
        ])
        .unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded[0].id, Some(newer));
    assert_eq!(loaded[1].id, Some(older));
}

#[test]
fn fresh_record_serializes_as_insert_row() {
    let row = serde_json::to_value(draft("t", "c")).unwrap();
    assert_eq!(row, serde_json::json!({ "title": "t", "content": "c" }));

    let id = Uuid::new_v4();
    let row = serde_json::to_value(NoteRecord::persisted(id, "t", "c", 5)).unwrap();
    assert_eq!(row["id"], serde_json::json!(id.to_string()));
    assert_eq!(row["created_at"], serde_json::json!(5));
}
