//! Selection transitions: which note is being edited, and whether the picker
//! panel is open.
//!
//! # Invariants
//! - `create_note` is the only selection transition that grows the collection.
//! - `toggle_panel` never moves the active index.

use crate::model::note::NoteRecord;
use crate::session::error::SessionError;
use crate::session::state::SessionState;

/// Editor fields seeded from the active note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorDraft {
    pub title: String,
    pub content: String,
}

impl SessionState {
    /// Prepends a blank unsaved note, selects it and closes the panel.
    pub fn create_note(&self) -> Result<Self, SessionError> {
        self.ensure_loaded()?;
        Ok(Self {
            notes: self.notes.clone().prepend(NoteRecord::untitled()),
            active_index: 0,
            panel_open: false,
            load: self.load,
        })
    }

    /// Selects the note at `index` and closes the panel.
    pub fn select_note(&self, index: usize) -> Result<Self, SessionError> {
        self.ensure_loaded()?;
        let len = self.notes.len();
        if index >= len {
            return Err(SessionError::IndexOutOfRange { index, len });
        }
        Ok(Self {
            active_index: index,
            panel_open: false,
            ..self.clone()
        })
    }

    /// Flips picker panel visibility.
    pub fn toggle_panel(&self) -> Self {
        Self {
            panel_open: !self.panel_open,
            ..self.clone()
        }
    }

    /// Returns editor fields for the active note (empty if none).
    pub fn draft(&self) -> EditorDraft {
        self.active_note()
            .map(|note| EditorDraft {
                title: note.title.clone(),
                content: note.content.clone(),
            })
            .unwrap_or_default()
    }
}
