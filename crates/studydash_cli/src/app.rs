//! Session bootstrap for one CLI invocation.
//!
//! # Responsibility
//! - Resolve configuration and prepare the data directory.
//! - Open storage and assemble the dashboard state object.
//!
//! # Invariants
//! - Logging failures never abort the session.
//! - Catalog failures are kept inside the dashboard state.

use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;
use std::path::PathBuf;
use studydash_core::db::open_db;
use studydash_core::{
    init_logging, loader_for, Dashboard, SqliteKvRepository, StudyDashConfig,
};

/// Dashboard bound to one storage connection.
pub struct Session<'conn> {
    pub dashboard: Dashboard<SqliteKvRepository<'conn>>,
}

impl<'conn> Session<'conn> {
    /// Loads the catalog and opens the stores.
    pub fn open(config: &StudyDashConfig, conn: &'conn Connection) -> Self {
        let loader = loader_for(&config.catalog_source);
        let dashboard = Dashboard::open(loader.as_ref(), SqliteKvRepository::new(conn));
        info!(
            "event=session_open module=cli status=ok catalog_loaded={}",
            dashboard.load_error().is_none()
        );
        Self { dashboard }
    }
}

/// Applies CLI overrides and makes the data directory absolute and present.
pub fn resolve_config(
    catalog: Option<String>,
    data_dir: Option<PathBuf>,
    log_level: Option<String>,
) -> Result<StudyDashConfig> {
    let mut config = StudyDashConfig::resolve(catalog, data_dir, log_level);
    if config.data_dir.is_relative() {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        config.data_dir = cwd.join(&config.data_dir);
    }
    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "Failed to create data directory '{}'",
            config.data_dir.display()
        )
    })?;
    Ok(config)
}

/// Starts file logging; problems are reported on stderr only.
pub fn init_session_logging(config: &StudyDashConfig) {
    if let Err(err) = init_logging(&config.log_level, &config.log_dir()) {
        eprintln!("warning: logging disabled: {err}");
    }
}

/// Opens the progress database under the data directory.
pub fn open_storage(config: &StudyDashConfig) -> Result<Connection> {
    let path = config.db_path();
    open_db(&path).with_context(|| format!("Failed to open storage '{}'", path.display()))
}
