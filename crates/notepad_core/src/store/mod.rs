//! Note store boundary.
//!
//! # Responsibility
//! - Define the persistence contract consumed by the session effect layer.
//! - Provide the SQLite-backed adapter over the `notes` table.
//!
//! # Invariants
//! - `insert_many` only accepts identity-less records; the store assigns ids.
//! - `upsert_many` only accepts records with an identity, matched by key.

use crate::db::DbError;
use crate::model::note::NoteRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised at the note store boundary.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// `insert_many` received a record that already has an id.
    UnexpectedIdentity { position: usize },
    /// `upsert_many` received a record without an id.
    MissingIdentity { position: usize },
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UnexpectedIdentity { position } => {
                write!(f, "insert row {position} already carries an id")
            }
            Self::MissingIdentity { position } => {
                write!(f, "upsert row {position} has no id")
            }
            Self::InvalidData(message) => write!(f, "invalid stored note data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract for the note session.
pub trait RemoteStore {
    /// Returns every stored note, newest first.
    fn load_all(&self) -> StoreResult<Vec<NoteRecord>>;
    /// Inserts identity-less notes and returns them with assigned identities,
    /// in input order.
    fn insert_many(&mut self, records: &[NoteRecord]) -> StoreResult<Vec<NoteRecord>>;
    /// Writes notes that already have an identity, inserting missing keys.
    fn upsert_many(&mut self, records: &[NoteRecord]) -> StoreResult<()>;
}

/// Rejects insert rows that already carry an identity.
pub fn ensure_fresh(records: &[NoteRecord]) -> StoreResult<()> {
    match records.iter().position(NoteRecord::has_remote_identity) {
        Some(position) => Err(StoreError::UnexpectedIdentity { position }),
        None => Ok(()),
    }
}

/// Rejects upsert rows without an identity.
pub fn ensure_identified(records: &[NoteRecord]) -> StoreResult<()> {
    match records.iter().position(|record| !record.has_remote_identity()) {
        Some(position) => Err(StoreError::MissingIdentity { position }),
        None => Ok(()),
    }
}
