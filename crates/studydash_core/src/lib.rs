//! Core domain logic for StudyDash.
//! This crate owns the catalog model, persisted stores and derived views.

pub mod catalog;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod search;
pub mod service;

pub use catalog::loader::{
    load_with_logging, loader_for, parse_catalog, CatalogError, CatalogLoader, CatalogResult,
    FileCatalogLoader, HttpCatalogLoader, DEFAULT_CATALOG_SOURCE,
};
pub use config::StudyDashConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{Catalog, Lesson, Subject};
pub use model::completion::CompletionMap;
pub use render::content::{escape_html, ContentFormatter, MarkdownFormatter, SafeTextFormatter};
pub use repo::kv_repo::{
    parse_or_default, KvRepository, RepoError, RepoResult, SqliteKvRepository,
};
pub use search::filter::{filter_lessons, LessonQuery};
pub use service::completion_store::{CompletionStore, COMPLETION_KEY};
pub use service::dashboard::{
    ActiveLesson, CardStatus, CatalogState, Dashboard, DashboardError, LessonList, LessonRow,
    Ongoing, SubjectCard,
};
pub use service::notes_store::{NotesStore, NOTES_KEY};
pub use service::progress::{progress, Progress};
pub use service::schedule::{weekly_schedule, ScheduleEvent, WeeklySchedule};
pub use service::selection::Selection;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
