//! Core domain logic for the notepad editor session.
//! This crate owns the note collection, selection state and save
//! reconciliation against the note store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod session;
pub mod store;

pub use config::NotepadConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::collection::{CollectionError, NoteCollection};
pub use model::note::{NoteId, NoteRecord, UNTITLED_NOTE_TITLE};
pub use service::note_session::{NoteSession, SaveOutcome};
pub use session::error::{LoadError, SessionError, WriteError, WriteOp};
pub use session::picker::{derive_preview_text, PickerItem};
pub use session::reconcile::{assign_identities, dispatch, partition, DispatchReport, SavePlan};
pub use session::selection::EditorDraft;
pub use session::state::{reduce, LoadStatus, SessionAction, SessionState, Transition};
pub use store::sqlite::SqliteNoteStore;
pub use store::{RemoteStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
