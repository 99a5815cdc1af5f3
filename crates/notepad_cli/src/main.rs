//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `notepad_core` linkage and schema bootstrap without the UI.
//! - Keep output deterministic for quick local sanity checks.

use notepad_core::db::migrations::latest_version;
use notepad_core::db::open_db_in_memory;
use notepad_core::{NoteSession, SqliteNoteStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("notepad_core ping={}", notepad_core::ping());
    println!("notepad_core version={}", notepad_core::core_version());
    println!("notepad_core schema_version={}", latest_version());

    let store = match open_db_in_memory()
        .map_err(|err| err.to_string())
        .and_then(|conn| SqliteNoteStore::try_new(conn).map_err(|err| err.to_string()))
    {
        Ok(store) => store,
        Err(err) => {
            eprintln!("notepad_core store_open=error error={err}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = NoteSession::start(store);
    let saved = session
        .commit_edit("smoke", "")
        .map(|outcome| outcome.report.is_ok());
    match saved {
        Ok(true) => {
            println!(
                "notepad_core session=ok notes={}",
                session.state().notes().len()
            );
            ExitCode::SUCCESS
        }
        Ok(false) => {
            eprintln!("notepad_core session=error stage=dispatch");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("notepad_core session=error error={err}");
            ExitCode::FAILURE
        }
    }
}
