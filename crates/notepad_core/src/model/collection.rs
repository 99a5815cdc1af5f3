//! Ordered note sequence.
//!
//! # Responsibility
//! - Hold notes in display order (position 0 = most recently touched).
//! - Provide the structural moves used by create and save.
//!
//! # Invariants
//! - Operations consume the old sequence and return the new one.
//! - Only `prepend` changes the length.
//! - A seeded collection is never empty.

use crate::model::note::NoteRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Index;

/// Structural operation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "note index {index} out of range for {len} note(s)")
            }
        }
    }
}

impl Error for CollectionError {}

/// Ordered, owned sequence of notes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteCollection {
    notes: Vec<NoteRecord>,
}

impl NoteCollection {
    /// Single-placeholder collection used before or instead of a load.
    pub fn placeholder() -> Self {
        Self {
            notes: vec![NoteRecord::placeholder()],
        }
    }

    /// Seeds from loaded records, falling back to the placeholder when none
    /// were loaded.
    pub fn seeded(records: Vec<NoteRecord>) -> Self {
        if records.is_empty() {
            return Self::placeholder();
        }
        Self { notes: records }
    }

    /// Inserts an unsaved record at position 0.
    pub fn prepend(mut self, record: NoteRecord) -> Self {
        self.notes.insert(0, record);
        self
    }

    /// Replaces the record at `index` in place.
    pub fn replace_at(mut self, index: usize, record: NoteRecord) -> Result<Self, CollectionError> {
        let len = self.notes.len();
        let slot = self
            .notes
            .get_mut(index)
            .ok_or(CollectionError::IndexOutOfRange { index, len })?;
        *slot = record;
        Ok(self)
    }

    /// Removes the record at `index` and reinserts it at position 0.
    pub fn move_to_front(self, index: usize) -> Result<Self, CollectionError> {
        self.move_to_front_with(index, |record| record)
    }

    /// Removes the record at `index`, transforms it, and inserts the result at
    /// position 0.
    pub fn move_to_front_with(
        mut self,
        index: usize,
        transform: impl FnOnce(NoteRecord) -> NoteRecord,
    ) -> Result<Self, CollectionError> {
        let len = self.notes.len();
        if index >= len {
            return Err(CollectionError::IndexOutOfRange { index, len });
        }
        let record = self.notes.remove(index);
        self.notes.insert(0, transform(record));
        Ok(self)
    }

    pub fn get(&self, index: usize) -> Option<&NoteRecord> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NoteRecord> {
        self.notes.iter()
    }

    pub fn as_slice(&self) -> &[NoteRecord] {
        &self.notes
    }

    pub fn into_vec(self) -> Vec<NoteRecord> {
        self.notes
    }
}

impl Index<usize> for NoteCollection {
    type Output = NoteRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.notes[index]
    }
}

impl<'a> IntoIterator for &'a NoteCollection {
    type Item = &'a NoteRecord;
    type IntoIter = std::slice::Iter<'a, NoteRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
