//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//! - Prepare the data directory before the database is opened.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - The log level is validated here, before logging starts.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "FLOWDESK_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "FLOWDESK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "FLOWDESK_LOG_DIR";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_DB_FILE_NAME: &str = "power_automate.db";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads `FLOWDESK_*` variables from the process environment.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggingError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = value(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = value(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&level)?;
        }
        config.log_dir = value(LOG_DIR_ENV).map(PathBuf::from);
        Ok(config)
    }

    /// Creates the parent directory of `db_path` when missing.
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        match self.db_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

/// Default database location, relative to the working directory.
pub fn default_db_path() -> PathBuf {
    Path::new(DEFAULT_DATA_DIR).join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{default_db_path, AppConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.db_path, default_db_path());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn variables_override_defaults_and_blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, " /tmp/flows.db "),
            (LOG_LEVEL_ENV, "WARNING"),
            (LOG_DIR_ENV, "   "),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/flows.db"));
        assert_eq!(config.log_level, "warn");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(AppConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "loud")])).is_err());
    }

    #[test]
    fn ensure_data_dir_creates_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            db_path: dir.path().join("nested/data/app.db"),
            ..AppConfig::default()
        };
        config.ensure_data_dir().unwrap();
        assert!(dir.path().join("nested/data").is_dir());
    }
}
