//! Runtime configuration resolved from the environment.
//!
//! | variable            | default                           |
//! |---------------------|-----------------------------------|
//! | `NOTEPAD_DB_PATH`   | `<temp dir>/notepad.sqlite3`      |
//! | `NOTEPAD_LOG_LEVEL` | `debug` (debug) / `info` (release)|
//! | `NOTEPAD_LOG_DIR`   | unset: no file logging            |
//!
//! Blank values count as unset.

use crate::logging::{default_log_level, init_logging, LogLevel, LoggingError};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "NOTEPAD_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "NOTEPAD_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "NOTEPAD_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "notepad.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotepadConfig {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    pub log_dir: Option<PathBuf>,
}

impl NotepadConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(env_lookup)
    }

    /// Resolves configuration through `lookup` (variable name -> value).
    ///
    /// Fails only on an unparseable `NOTEPAD_LOG_LEVEL`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggingError> {
        let log_level = match non_blank(&lookup, LOG_LEVEL_ENV) {
            Some(value) => value.parse()?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path: Self::db_path_from_lookup(&lookup),
            log_level,
            log_dir: non_blank(&lookup, LOG_DIR_ENV).map(PathBuf::from),
        })
    }

    /// Resolves only the note database path; never fails.
    pub fn db_path_from_env() -> PathBuf {
        Self::db_path_from_lookup(env_lookup)
    }

    pub fn db_path_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
        non_blank(&lookup, DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
    }

    /// Starts file logging when `log_dir` is configured.
    ///
    /// Returns `Ok(false)` without touching the logger when no directory is set.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        let Some(log_dir) = self.log_dir.as_ref() else {
            return Ok(false);
        };
        init_logging(self.log_level.as_str(), &log_dir.to_string_lossy())?;
        Ok(true)
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_blank(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{NotepadConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::{default_log_level, LogLevel};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = NotepadConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "   ")])).unwrap();
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("notepad.sqlite3")
        );
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = NotepadConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, "/data/notes.db"),
            (LOG_LEVEL_ENV, "WARN"),
            (LOG_DIR_ENV, "/var/log/notepad"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/notes.db"));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/notepad")));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(NotepadConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "loud")])).is_err());
    }

    #[test]
    fn db_path_resolves_despite_invalid_log_level() {
        let lookup = lookup_from(&[(DB_PATH_ENV, "/data/notes.db"), (LOG_LEVEL_ENV, "loud")]);
        assert_eq!(
            NotepadConfig::db_path_from_lookup(&lookup),
            PathBuf::from("/data/notes.db")
        );
        assert!(NotepadConfig::from_lookup(&lookup).is_err());
    }

    #[test]
    fn init_logging_is_skipped_without_log_dir() {
        let config = NotepadConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "error")])).unwrap();
        assert_eq!(config.init_logging(), Ok(false));
    }
}
