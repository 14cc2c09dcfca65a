//! Session configuration.
//!
//! # Responsibility
//! - Resolve catalog source, data directory and log level with defaults.
//! - Derive storage and log paths from the data directory.

use crate::catalog::loader::DEFAULT_CATALOG_SOURCE;
use crate::logging::default_log_level;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "studydash";
const DB_FILE_NAME: &str = "studydash.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved settings for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyDashConfig {
    /// File path or `http(s)://` URL of the catalog JSON.
    pub catalog_source: String,
    /// Directory holding the storage file and logs.
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl Default for StudyDashConfig {
    fn default() -> Self {
        Self {
            catalog_source: DEFAULT_CATALOG_SOURCE.to_string(),
            data_dir: default_data_dir(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl StudyDashConfig {
    /// Applies optional overrides on top of defaults.
    pub fn resolve(
        catalog_source: Option<String>,
        data_dir: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            catalog_source: catalog_source.unwrap_or(defaults.catalog_source),
            data_dir: data_dir.unwrap_or(defaults.data_dir),
            log_level: log_level.unwrap_or(defaults.log_level),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

/// Platform data directory, or `./.studydash` when none is known.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR_NAME}")))
}
