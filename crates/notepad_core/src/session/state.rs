//! Session state and the pure transition function.
//!
//! # Invariants
//! - `active_index` always points inside `notes`.
//! - Note-mutating actions are rejected while the load is pending.

use crate::model::collection::NoteCollection;
use crate::model::note::NoteRecord;
use crate::session::error::SessionError;
use crate::session::reconcile::{assign_identities, SavePlan};

/// Progress of the initial `load_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Load not resolved yet; the placeholder is shown.
    Pending,
    /// Notes were loaded from the store.
    Ready,
    /// Load failed; the placeholder stands in.
    Fallback,
}

/// Full state of one editor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) notes: NoteCollection,
    pub(crate) active_index: usize,
    pub(crate) panel_open: bool,
    pub(crate) load: LoadStatus,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::pending()
    }
}

impl SessionState {
    /// State before the initial load resolves.
    pub fn pending() -> Self {
        Self {
            notes: NoteCollection::placeholder(),
            active_index: 0,
            panel_open: false,
            load: LoadStatus::Pending,
        }
    }

    /// State seeded from loaded records.
    pub fn loaded(records: Vec<NoteRecord>) -> Self {
        Self {
            notes: NoteCollection::seeded(records),
            load: LoadStatus::Ready,
            ..Self::pending()
        }
    }

    /// State after a failed load.
    pub fn load_failed() -> Self {
        Self {
            load: LoadStatus::Fallback,
            ..Self::pending()
        }
    }

    pub fn notes(&self) -> &NoteCollection {
        &self.notes
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load
    }

    /// Returns the note currently shown for editing.
    pub fn active_note(&self) -> Option<&NoteRecord> {
        self.notes.get(self.active_index)
    }

    pub(crate) fn ensure_loaded(&self) -> Result<(), SessionError> {
        if self.load == LoadStatus::Pending {
            return Err(SessionError::LoadPending);
        }
        Ok(())
    }
}

/// UI or effect-layer input to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Loaded(Vec<NoteRecord>),
    LoadFailed,
    CreateNote,
    SelectNote(usize),
    TogglePanel,
    CommitEdit { title: String, content: String },
    /// Insert succeeded; merge returned identities into the fresh positions.
    IdentitiesAssigned {
        positions: Vec<usize>,
        inserted: Vec<NoteRecord>,
    },
}

/// Result of one transition: the next state plus an optional save to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub effect: Option<SavePlan>,
}

impl Transition {
    fn state_only(state: SessionState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

/// Applies one action to `state` and returns the next state.
///
/// The input state is never modified; on error the caller keeps it.
pub fn reduce(state: &SessionState, action: SessionAction) -> Result<Transition, SessionError> {
    match action {
        SessionAction::Loaded(records) => Ok(Transition::state_only(SessionState {
            panel_open: state.panel_open,
            ..SessionState::loaded(records)
        })),
        SessionAction::LoadFailed => Ok(Transition::state_only(SessionState {
            panel_open: state.panel_open,
            ..SessionState::load_failed()
        })),
        SessionAction::CreateNote => state.create_note().map(Transition::state_only),
        SessionAction::SelectNote(index) => state.select_note(index).map(Transition::state_only),
        SessionAction::TogglePanel => Ok(Transition::state_only(state.toggle_panel())),
        SessionAction::CommitEdit { title, content } => {
            let (next, plan) = state.commit_edit(title, content)?;
            Ok(Transition {
                state: next,
                effect: Some(plan),
            })
        }
        SessionAction::IdentitiesAssigned {
            positions,
            inserted,
        } => {
            let (next, _) = assign_identities(state, &positions, &inserted);
            Ok(Transition::state_only(next))
        }
    }
}
