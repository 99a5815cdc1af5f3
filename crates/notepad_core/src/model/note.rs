//! Note value type.
//!
//! # Responsibility
//! - Define the record shape stored in the `notes` table.
//! - Provide the constructors used by create/load/save flows.
//!
//! # Invariants
//! - `id` and `created_at` are assigned by the store, never by the client.
//! - Title and content are accepted as-is; empty values are valid.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque remote identity assigned by the note store on insert.
pub type NoteId = Uuid;

/// Title given to notes created from the picker panel.
pub const UNTITLED_NOTE_TITLE: &str = "Untitled Note";

/// One note, persisted or still local.
///
/// Serialized with the store column names; absent identity fields are omitted
/// so a fresh record serializes as an insert row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Remote identity. `None` until the store accepts an insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NoteId>,
    pub title: String,
    pub content: String,
    /// Store-side creation time in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl NoteRecord {
    /// Creates a blank, unsaved note for the "new note" action.
    pub fn untitled() -> Self {
        Self {
            id: None,
            title: UNTITLED_NOTE_TITLE.to_string(),
            content: String::new(),
            created_at: None,
        }
    }

    /// Empty record shown while nothing has been loaded.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Creates a record as read back from the store.
    pub fn persisted(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            content: content.into(),
            created_at: Some(created_at),
        }
    }

    /// Returns whether the store has already assigned an identity.
    pub fn has_remote_identity(&self) -> bool {
        self.id.is_some()
    }

    /// Returns a copy carrying the editor draft.
    ///
    /// `id` and `created_at` are preserved; they are the merge key for
    /// records that already exist remotely.
    pub fn with_draft(&self, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: self.id,
            title: title.into(),
            content: content.into(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteRecord, UNTITLED_NOTE_TITLE};
    use uuid::Uuid;

    #[test]
    fn untitled_note_has_no_identity() {
        let note = NoteRecord::untitled();
        assert_eq!(note.title, UNTITLED_NOTE_TITLE);
        assert!(note.content.is_empty());
        assert!(!note.has_remote_identity());
        assert_eq!(note.created_at, None);
    }

    #[test]
    fn with_draft_keeps_identity_and_timestamp() {
        let id = Uuid::new_v4();
        let note = NoteRecord::persisted(id, "old", "body", 1_700_000_000_000);

        let merged = note.with_draft("new", "changed");
        assert_eq!(merged.id, Some(id));
        assert_eq!(merged.created_at, Some(1_700_000_000_000));
        assert_eq!(merged.title, "new");
        assert_eq!(merged.content, "changed");
    }
}
