//! Session error taxonomy.

use crate::model::collection::CollectionError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error returned by session transitions. State is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Selection target is outside the collection.
    IndexOutOfRange { index: usize, len: usize },
    /// Note actions are gated until the initial load resolves.
    LoadPending,
    /// Internal consistency mismatch between collection and plan.
    InconsistentState(&'static str),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "note index {index} out of range for {len} note(s)")
            }
            Self::LoadPending => write!(f, "notes are still loading"),
            Self::InconsistentState(details) => write!(f, "inconsistent session state: {details}"),
        }
    }
}

impl Error for SessionError {}

impl From<CollectionError> for SessionError {
    fn from(value: CollectionError) -> Self {
        match value {
            CollectionError::IndexOutOfRange { index, len } => {
                Self::IndexOutOfRange { index, len }
            }
        }
    }
}

/// Initial load failed; the session falls back to the placeholder.
#[derive(Debug)]
pub struct LoadError {
    pub source: StoreError,
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to load notes: {}", self.source)
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Which batch write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Insert,
    Upsert,
}

impl WriteOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Upsert => "upsert",
        }
    }
}

/// One batch write failed. Reported, never rolled back.
#[derive(Debug)]
pub struct WriteError {
    pub op: WriteOp,
    pub records: usize,
    pub source: StoreError,
}

impl Display for WriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} note(s) failed: {}",
            self.op.as_str(),
            self.records,
            self.source
        )
    }
}

impl Error for WriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
