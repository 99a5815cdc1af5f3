//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the note editor action surface (create/select/toggle/commit).
//! - Hold one process-wide note session behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every session call returns a fresh snapshot on success.
//! - Store write failures are reported in `message`; `ok` stays `true`
//!   because the local commit stands.

use log::warn;
use notepad_core::db::open_db;
use notepad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    LoadStatus, NoteSession, NotepadConfig, SqliteNoteStore,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

type FfiSession = NoteSession<SqliteNoteStore>;

static SESSION: Mutex<Option<FfiSession>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path for rolling logs.
/// - Idempotent for the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Initializes logging from `NOTEPAD_LOG_LEVEL` / `NOTEPAD_LOG_DIR`.
///
/// # FFI contract
/// - No-op when `NOTEPAD_LOG_DIR` is unset.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging_from_env() -> String {
    match NotepadConfig::from_env().and_then(|config| config.init_logging()) {
        Ok(_) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One picker row as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub position: u32,
    /// Remote identity; `None` for notes not saved yet.
    pub id: Option<String>,
    pub title: String,
    pub preview: Option<String>,
    pub is_active: bool,
}

/// Everything the editor screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub items: Vec<NoteItem>,
    pub active_index: u32,
    pub panel_open: bool,
    /// Editor fields seeded from the active note.
    pub draft_title: String,
    pub draft_content: String,
    /// `false` when the initial load failed and the placeholder is shown.
    pub loaded_from_store: bool,
}

/// Response envelope for session calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesResponse {
    pub ok: bool,
    pub message: String,
    pub snapshot: Option<SessionSnapshot>,
}

impl NotesResponse {
    fn success(message: impl Into<String>, session: &FfiSession) -> Self {
        Self {
            ok: true,
            message: message.into(),
            snapshot: Some(snapshot_of(session)),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            snapshot: None,
        }
    }
}

/// Opens the note database and starts the process-wide session.
///
/// `db_path = None` resolves the path from `NOTEPAD_DB_PATH` (or the temp
/// dir default). Re-opening replaces the current session.
///
/// # FFI contract
/// - Sync call; performs the initial load.
/// - A failed load still opens the session on the placeholder note.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_open(db_path: Option<String>) -> NotesResponse {
    let path = resolve_db_path(db_path);
    let store = match open_db(&path)
        .map_err(|err| err.to_string())
        .and_then(|conn| SqliteNoteStore::try_new(conn).map_err(|err| err.to_string()))
    {
        Ok(store) => store,
        Err(err) => return NotesResponse::failure(format!("notes_open failed: {err}")),
    };

    let session = NoteSession::start(store);
    let message = match session.load_error() {
        Some(err) => format!("Notes could not be loaded: {err}"),
        None => format!("Loaded {} note(s).", session.state().notes().len()),
    };
    let mut guard = lock_session();
    let response = NotesResponse::success(message, &session);
    *guard = Some(session);
    response
}

/// Creates a blank note at the top of the list and selects it.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create() -> NotesResponse {
    with_session("note_create", |session| {
        session.create_note().map_err(|err| err.to_string())?;
        Ok("Note created.".to_string())
    })
}

/// Selects the note at `index` and closes the picker panel.
#[flutter_rust_bridge::frb(sync)]
pub fn note_select(index: u32) -> NotesResponse {
    with_session("note_select", |session| {
        let index = usize::try_from(index).map_err(|err| err.to_string())?;
        session.select_note(index).map_err(|err| err.to_string())?;
        Ok(String::new())
    })
}

/// Opens or closes the picker panel.
#[flutter_rust_bridge::frb(sync)]
pub fn panel_toggle() -> NotesResponse {
    with_session("panel_toggle", |session| {
        session.toggle_panel().map_err(|err| err.to_string())?;
        Ok(String::new())
    })
}

/// Commits the editor draft into the active note and saves all notes.
#[flutter_rust_bridge::frb(sync)]
pub fn note_commit(title: String, content: String) -> NotesResponse {
    with_session("note_commit", |session| {
        let outcome = session
            .commit_edit(title, content)
            .map_err(|err| err.to_string())?;
        if outcome.report.is_ok() {
            return Ok("Saved.".to_string());
        }
        let failures = outcome
            .report
            .errors
            .iter()
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Ok(format!("Saved locally; sync failed: {failures}"))
    })
}

/// Returns the current session snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_snapshot() -> NotesResponse {
    with_session("notes_snapshot", |_| Ok(String::new()))
}

fn with_session(
    op: &str,
    f: impl FnOnce(&mut FfiSession) -> Result<String, String>,
) -> NotesResponse {
    let mut guard = lock_session();
    let Some(session) = guard.as_mut() else {
        return NotesResponse::failure(format!("{op} failed: notes session is not open"));
    };
    match f(session) {
        Ok(message) => NotesResponse::success(message, session),
        Err(err) => NotesResponse::failure(format!("{op} failed: {err}")),
    }
}

fn lock_session() -> MutexGuard<'static, Option<FfiSession>> {
    SESSION.lock().unwrap_or_else(|poisoned| {
        warn!("event=session_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    })
}

fn resolve_db_path(db_path: Option<String>) -> PathBuf {
    db_path
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(NotepadConfig::db_path_from_env)
}

fn snapshot_of(session: &FfiSession) -> SessionSnapshot {
    let state = session.state();
    let draft = state.draft();
    let items = state
        .picker_items()
        .into_iter()
        .map(|item| NoteItem {
            position: u32::try_from(item.position).unwrap_or(u32::MAX),
            id: state
                .notes()
                .get(item.position)
                .and_then(|note| note.id)
                .map(|id| id.to_string()),
            title: item.title,
            preview: item.preview,
            is_active: item.is_active,
        })
        .collect();

    SessionSnapshot {
        items,
        active_index: u32::try_from(state.active_index()).unwrap_or(u32::MAX),
        panel_open: state.is_panel_open(),
        draft_title: draft.title,
        draft_content: draft.content,
        loaded_from_store: state.load_status() == LoadStatus::Ready,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, note_commit, note_create, note_select, notes_open,
        notes_snapshot, panel_toggle, ping, resolve_db_path,
    };
    use notepad_core::NotepadConfig;
    use std::path::PathBuf;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn explicit_db_path_wins_and_blank_falls_back_to_env_default() {
        assert_eq!(
            resolve_db_path(Some(" /data/notes.db ".to_string())),
            PathBuf::from("/data/notes.db")
        );
        assert_eq!(
            resolve_db_path(Some("   ".to_string())),
            NotepadConfig::db_path_from_env()
        );
    }

    #[test]
    fn session_flow_through_ffi() {
        let before_open = note_create();
        assert!(!before_open.ok);
        assert!(before_open.message.contains("not open"));

        let dir = tempfile::tempdir().expect("temp dir");
        let db_path = dir.path().join("ffi.db").to_string_lossy().into_owned();

        let opened = notes_open(Some(db_path.clone()));
        assert!(opened.ok, "{}", opened.message);
        let snapshot = opened.snapshot.expect("snapshot after open");
        assert_eq!(snapshot.items.len(), 1);
        assert!(snapshot.loaded_from_store);

        let created = note_create();
        assert!(created.ok, "{}", created.message);
        let snapshot = created.snapshot.expect("snapshot after create");
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.active_index, 0);
        assert_eq!(snapshot.draft_title, "Untitled Note");

        let committed = note_commit("Groceries".to_string(), "- milk\n- eggs".to_string());
        assert!(committed.ok, "{}", committed.message);
        assert_eq!(committed.message, "Saved.");
        let snapshot = committed.snapshot.expect("snapshot after commit");
        assert_eq!(snapshot.items[0].title, "Groceries");
        assert_eq!(snapshot.items[0].preview.as_deref(), Some("milk eggs"));
        assert!(snapshot.items.iter().all(|item| item.id.is_some()));

        let toggled = panel_toggle();
        assert!(toggled.snapshot.expect("snapshot").panel_open);
        let selected = note_select(1);
        let snapshot = selected.snapshot.expect("snapshot after select");
        assert_eq!(snapshot.active_index, 1);
        assert!(!snapshot.panel_open);

        let rejected = note_select(9);
        assert!(!rejected.ok);
        assert!(rejected.message.contains("out of range"));

        let reopened = notes_open(Some(db_path));
        let snapshot = reopened.snapshot.expect("snapshot after reopen");
        assert_eq!(snapshot.items.len(), 2);
        assert!(notes_snapshot().ok);
    }
}
