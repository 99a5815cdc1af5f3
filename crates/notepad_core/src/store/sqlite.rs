//! SQLite-backed note store.
//!
//! # Responsibility
//! - Implement `RemoteStore` over the `notes` table.
//! - Assign identities and creation timestamps on insert.
//!
//! # Invariants
//! - Each batch write runs in one immediate transaction.
//! - Upserts never overwrite `created_at` of an existing row.

use crate::model::note::{NoteId, NoteRecord};
use crate::store::{ensure_fresh, ensure_identified, RemoteStore, StoreError, StoreResult};
use rusqlite::{params, Connection, TransactionBehavior};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT id, title, content, created_at FROM notes";

/// Note store owning one migrated SQLite connection.
pub struct SqliteNoteStore {
    conn: Connection,
}

impl SqliteNoteStore {
    /// Wraps a connection returned by `db::open_db` / `db::open_db_in_memory`.
    ///
    /// Fails when the `notes` table or one of its columns is missing.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        ensure_notes_table(&conn)?;
        Ok(Self { conn })
    }

    /// Returns one stored note by id.
    pub fn get(&self, id: NoteId) -> StoreResult<Option<NoteRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_note_row(row)?)),
            None => Ok(None),
        }
    }

    /// Returns the number of stored notes.
    pub fn count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| StoreError::InvalidData(format!("negative row count {count}")))
    }
}

impl RemoteStore for SqliteNoteStore {
    fn load_all(&self) -> StoreResult<Vec<NoteRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY created_at DESC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn insert_many(&mut self, records: &[NoteRecord]) -> StoreResult<Vec<NoteRecord>> {
        ensure_fresh(records)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut inserted = Vec::with_capacity(records.len());
        for record in records {
            let id = Uuid::new_v4();
            let created_at: i64 = tx.query_row(
                "INSERT INTO notes (id, title, content, created_at)
                 VALUES (?1, ?2, ?3, COALESCE(?4, CAST(strftime('%s', 'now') AS INTEGER) * 1000))
                 RETURNING created_at;",
                params![
                    id.to_string(),
                    record.title.as_str(),
                    record.content.as_str(),
                    record.created_at,
                ],
                |row| row.get(0),
            )?;
            inserted.push(NoteRecord::persisted(
                id,
                record.title.as_str(),
                record.content.as_str(),
                created_at,
            ));
        }
        tx.commit()?;

        Ok(inserted)
    }

    fn upsert_many(&mut self, records: &[NoteRecord]) -> StoreResult<()> {
        ensure_identified(records)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        for record in records {
            let Some(id) = record.id else {
                continue;
            };
            tx.execute(
                "INSERT INTO notes (id, title, content, created_at)
                 VALUES (?1, ?2, ?3, COALESCE(?4, CAST(strftime('%s', 'now') AS INTEGER) * 1000))
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    content = excluded.content;",
                params![
                    id.to_string(),
                    record.title.as_str(),
                    record.content.as_str(),
                    record.created_at,
                ],
            )?;
        }
        tx.commit()?;

        Ok(())
    }
}

fn parse_note_row(row: &rusqlite::Row<'_>) -> StoreResult<NoteRecord> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{id_text}` in notes.id")))?;
    Ok(NoteRecord::persisted(
        id,
        row.get::<_, String>("title")?,
        row.get::<_, String>("content")?,
        row.get("created_at")?,
    ))
}

fn ensure_notes_table(conn: &Connection) -> StoreResult<()> {
    let mut stmt = conn.prepare("PRAGMA table_info(notes);")?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }

    if columns.is_empty() {
        return Err(StoreError::InvalidData(
            "required table `notes` is missing".to_string(),
        ));
    }
    for required in ["id", "title", "content", "created_at"] {
        if !columns.iter().any(|column| column == required) {
            return Err(StoreError::InvalidData(format!(
                "required column `notes.{required}` is missing"
            )));
        }
    }
    Ok(())
}
