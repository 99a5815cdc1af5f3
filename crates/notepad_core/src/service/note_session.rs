//! Note session service.
//!
//! # Responsibility
//! - Run the initial load and seed the session (placeholder on failure).
//! - Apply UI actions through `session::state::reduce`.
//! - Dispatch save plans and merge inserted identities back.
//!
//! # Invariants
//! - Store failures are logged and reported, never returned as `Err`.
//! - The service never exposes a session whose load is still pending.

use crate::session::error::{LoadError, SessionError};
use crate::session::reconcile::{dispatch, DispatchReport};
use crate::session::state::{reduce, SessionAction, SessionState};
use crate::store::RemoteStore;
use log::{info, warn};
use std::time::Instant;

/// Result of one `commit_edit`.
#[derive(Debug)]
pub struct SaveOutcome {
    pub report: DispatchReport,
    /// Notes that received their store identity during this save.
    pub identities_merged: usize,
}

/// One editor session bound to a note store.
pub struct NoteSession<S: RemoteStore> {
    store: S,
    state: SessionState,
    load_error: Option<LoadError>,
}

impl<S: RemoteStore> NoteSession<S> {
    /// Loads all notes from `store` and seeds the session.
    ///
    /// A failed load is logged and the session starts from the placeholder.
    pub fn start(store: S) -> Self {
        let started_at = Instant::now();
        let pending = SessionState::pending();
        let (action, load_error) = match store.load_all() {
            Ok(records) => {
                info!(
                    "event=notes_load module=session status=ok count={} duration_ms={}",
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                (SessionAction::Loaded(records), None)
            }
            Err(source) => {
                let err = LoadError { source };
                warn!(
                    "event=notes_load module=session status=error fallback=placeholder duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                (SessionAction::LoadFailed, Some(err))
            }
        };

        let state = match reduce(&pending, action) {
            Ok(transition) => transition.state,
            Err(_) => SessionState::load_failed(),
        };
        Self {
            store,
            state,
            load_error,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Failure of the initial load, if the session fell back to the placeholder.
    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    pub fn create_note(&mut self) -> Result<(), SessionError> {
        self.apply(SessionAction::CreateNote)?;
        info!(
            "event=note_create module=session status=ok count={} active_index={}",
            self.state.notes().len(),
            self.state.active_index()
        );
        Ok(())
    }

    pub fn select_note(&mut self, index: usize) -> Result<(), SessionError> {
        self.apply(SessionAction::SelectNote(index))?;
        info!("event=note_select module=session status=ok active_index={index}");
        Ok(())
    }

    pub fn toggle_panel(&mut self) -> Result<(), SessionError> {
        self.apply(SessionAction::TogglePanel)
    }

    /// Commits the editor draft and writes the collection to the store.
    ///
    /// The local commit stands even when a write fails; failures are in the
    /// returned report.
    pub fn commit_edit(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<SaveOutcome, SessionError> {
        let transition = reduce(
            &self.state,
            SessionAction::CommitEdit {
                title: title.into(),
                content: content.into(),
            },
        )?;
        self.state = transition.state;
        let plan = transition
            .effect
            .ok_or(SessionError::InconsistentState("commit produced no save plan"))?;
        info!(
            "event=note_commit module=session status=ok existing={} fresh={}",
            plan.existing.len(),
            plan.fresh.len()
        );

        let report = dispatch(&mut self.store, &plan);
        let before = self.unsaved_count();
        if !report.inserted.is_empty() {
            self.apply(SessionAction::IdentitiesAssigned {
                positions: plan.fresh_positions.clone(),
                inserted: report.inserted.clone(),
            })?;
        }
        let identities_merged = before - self.unsaved_count();
        if identities_merged > 0 {
            info!("event=identities_merge module=session status=ok merged={identities_merged}");
        }

        Ok(SaveOutcome {
            report,
            identities_merged,
        })
    }

    /// Returns the store, dropping the in-memory session.
    pub fn into_store(self) -> S {
        self.store
    }

    fn apply(&mut self, action: SessionAction) -> Result<(), SessionError> {
        let transition = reduce(&self.state, action)?;
        self.state = transition.state;
        Ok(())
    }

    fn unsaved_count(&self) -> usize {
        self.state
            .notes()
            .iter()
            .filter(|note| !note.has_remote_identity())
            .count()
    }
}
