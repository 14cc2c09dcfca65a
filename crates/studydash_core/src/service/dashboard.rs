//! Dashboard application state.
//!
//! # Responsibility
//! - Own the catalog load state, both persisted stores, the active selection
//!   and the search query for one session.
//! - Expose the mutation API and the derived views front ends render.
//!
//! # Invariants
//! - The catalog is never mutated after construction.
//! - A failed catalog load yields empty views and a visible error state; it
//!   never aborts the session.
//! - Resetting completion leaves notes and catalog untouched.

use crate::catalog::loader::{load_with_logging, CatalogLoader};
use crate::model::catalog::{Catalog, Lesson};
use crate::repo::kv_repo::{KvRepository, RepoError};
use crate::search::filter::filter_lessons;
use crate::service::completion_store::CompletionStore;
use crate::service::notes_store::NotesStore;
use crate::service::progress::{progress, Progress};
use crate::service::schedule::{weekly_schedule, WeeklySchedule};
use crate::service::selection::Selection;
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMPTY_CATALOG: Catalog = Catalog {
    subjects: Vec::new(),
};

/// Error for dashboard mutations.
#[derive(Debug)]
pub enum DashboardError {
    /// Persisting a store failed.
    Repo(RepoError),
    /// Action requires a viewed lesson.
    NoActiveLesson,
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::NoActiveLesson => write!(f, "no lesson is open"),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NoActiveLesson => None,
        }
    }
}

impl From<RepoError> for DashboardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Outcome of the one-time catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loaded(Catalog),
    /// Load failed; carries a message for diagnostics.
    Failed(String),
}

/// Card status shown next to subject progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Done,
    InProgress,
}

impl CardStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Done => "Done",
            Self::InProgress => "In progress",
        }
    }
}

/// Subject card projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectCard {
    pub subject_id: String,
    pub name: String,
    pub description: String,
    pub progress: Progress,
    pub status: CardStatus,
}

/// One row of the lesson list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonRow {
    pub lesson_id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub done: bool,
}

/// Lesson list panel state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LessonList {
    /// Catalog could not be loaded.
    LoadFailed,
    /// No subject is open.
    NoSubject,
    /// Filtered lessons of the open subject; may be empty.
    Lessons {
        subject_id: String,
        subject_name: String,
        query: String,
        rows: Vec<LessonRow>,
    },
}

/// "Ongoing" summary box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Ongoing {
    Idle,
    Subject {
        subject_id: String,
        name: String,
        progress: Progress,
    },
}

/// Viewed lesson detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveLesson {
    pub subject_id: String,
    pub subject_name: String,
    pub lesson: Lesson,
    pub done: bool,
}

/// Explicitly constructed session state.
pub struct Dashboard<R: KvRepository> {
    catalog: CatalogState,
    completion: CompletionStore<R>,
    notes: NotesStore<R>,
    selection: Selection,
    query: String,
}

impl<R: KvRepository + Clone> Dashboard<R> {
    /// Loads the catalog and opens both stores over `repo`.
    ///
    /// A catalog failure is recorded as [`CatalogState::Failed`].
    pub fn open(loader: &dyn CatalogLoader, repo: R) -> Self {
        let catalog = match load_with_logging(loader) {
            Ok(catalog) => CatalogState::Loaded(catalog),
            Err(err) => CatalogState::Failed(err.to_string()),
        };
        Self::new(
            catalog,
            CompletionStore::open(repo.clone()),
            NotesStore::open(repo),
        )
    }
}

impl<R: KvRepository> Dashboard<R> {
    /// Assembles a dashboard; the initial selection opens the first subject.
    pub fn new(
        catalog: CatalogState,
        completion: CompletionStore<R>,
        notes: NotesStore<R>,
    ) -> Self {
        let selection = Selection::initial(catalog_of(&catalog));
        Self {
            catalog,
            completion,
            notes,
            selection,
            query: String::new(),
        }
    }

    /// Loaded catalog, or `None` after a failed load.
    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.catalog {
            CatalogState::Loaded(catalog) => Some(catalog),
            CatalogState::Failed(_) => None,
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        match &self.catalog {
            CatalogState::Loaded(_) => None,
            CatalogState::Failed(message) => Some(message.as_str()),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn notes(&self) -> &str {
        self.notes.text()
    }

    pub fn completion(&self) -> &CompletionStore<R> {
        &self.completion
    }

    pub fn is_done(&self, subject_id: &str, lesson_id: &str) -> bool {
        self.completion.is_done(subject_id, lesson_id)
    }

    /// Progress of one subject; `None` when the subject is unknown.
    pub fn progress_of(&self, subject_id: &str) -> Option<Progress> {
        let subject = catalog_of(&self.catalog).subject(subject_id)?;
        Some(progress(subject, |s, l| self.completion.is_done(s, l)))
    }

    pub fn open_subject(&mut self, subject_id: &str) -> bool {
        self.selection
            .open_subject(catalog_of(&self.catalog), subject_id)
    }

    pub fn open_lesson(&mut self, subject_id: &str, lesson_id: Option<&str>) -> bool {
        self.selection
            .open_lesson(catalog_of(&self.catalog), subject_id, lesson_id)
    }

    pub fn close_lesson(&mut self) -> bool {
        self.selection.close_lesson()
    }

    pub fn open_next_unfinished(&mut self) -> bool {
        let completion = &self.completion;
        self.selection
            .open_next_unfinished(catalog_of(&self.catalog), |s, l| completion.is_done(s, l))
    }

    /// Replaces the raw search query; normalization happens at filter time.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Lessons of the open subject matching the current query.
    pub fn filtered_lessons(&self) -> Vec<&Lesson> {
        match self.selection.active_subject(catalog_of(&self.catalog)) {
            Some(subject) => filter_lessons(&subject.lessons, &self.query),
            None => Vec::new(),
        }
    }

    /// Flips completion of the viewed lesson and returns the new value.
    pub fn toggle_active_lesson(&mut self) -> Result<bool, DashboardError> {
        let Some((subject, lesson)) = self.selection.active_lesson(catalog_of(&self.catalog))
        else {
            return Err(DashboardError::NoActiveLesson);
        };
        Ok(self.completion.toggle(&subject.id, &lesson.id)?)
    }

    /// Sets completion for a catalog lesson.
    ///
    /// Returns `Ok(false)` without touching storage when the pairing does not
    /// exist in the catalog.
    pub fn set_done(
        &mut self,
        subject_id: &str,
        lesson_id: &str,
        value: bool,
    ) -> Result<bool, DashboardError> {
        if catalog_of(&self.catalog)
            .lesson(subject_id, lesson_id)
            .is_none()
        {
            warn!("event=completion_set module=dashboard status=ignored reason=unknown_lesson");
            return Ok(false);
        }
        self.completion.set_done(subject_id, lesson_id, value)?;
        Ok(true)
    }

    /// Clears all completion flags; notes are kept.
    pub fn reset_completion(&mut self) -> Result<(), DashboardError> {
        self.completion.reset_all()?;
        info!("event=dashboard_reset module=dashboard status=ok");
        Ok(())
    }

    pub fn update_notes(&mut self, text: impl Into<String>) -> Result<(), DashboardError> {
        Ok(self.notes.update(text)?)
    }

    pub fn append_note_line(&mut self, line: &str) -> Result<(), DashboardError> {
        Ok(self.notes.append_line(line)?)
    }

    /// Cards for every subject in catalog order.
    pub fn subject_cards(&self) -> Vec<SubjectCard> {
        catalog_of(&self.catalog)
            .subjects
            .iter()
            .map(|subject| {
                let progress = progress(subject, |s, l| self.completion.is_done(s, l));
                let status = if progress.is_complete() {
                    CardStatus::Done
                } else {
                    CardStatus::InProgress
                };
                SubjectCard {
                    subject_id: subject.id.clone(),
                    name: subject.name.clone(),
                    description: subject.description.clone(),
                    progress,
                    status,
                }
            })
            .collect()
    }

    pub fn lesson_list(&self) -> LessonList {
        if self.load_error().is_some() {
            return LessonList::LoadFailed;
        }
        let Some(subject) = self.selection.active_subject(catalog_of(&self.catalog)) else {
            return LessonList::NoSubject;
        };

        let rows = filter_lessons(&subject.lessons, &self.query)
            .into_iter()
            .map(|lesson| LessonRow {
                lesson_id: lesson.id.clone(),
                title: lesson.title.clone(),
                tags: lesson.tags.clone(),
                done: self.completion.is_done(&subject.id, &lesson.id),
            })
            .collect();

        LessonList::Lessons {
            subject_id: subject.id.clone(),
            subject_name: subject.name.clone(),
            query: self.query.clone(),
            rows,
        }
    }

    pub fn ongoing(&self) -> Ongoing {
        match self.selection.active_subject(catalog_of(&self.catalog)) {
            Some(subject) => Ongoing::Subject {
                subject_id: subject.id.clone(),
                name: subject.name.clone(),
                progress: progress(subject, |s, l| self.completion.is_done(s, l)),
            },
            None => Ongoing::Idle,
        }
    }

    /// Viewed lesson, when the selection resolves in the catalog.
    pub fn active_lesson(&self) -> Option<ActiveLesson> {
        let (subject, lesson) = self.selection.active_lesson(catalog_of(&self.catalog))?;
        Some(ActiveLesson {
            subject_id: subject.id.clone(),
            subject_name: subject.name.clone(),
            lesson: lesson.clone(),
            done: self.completion.is_done(&subject.id, &lesson.id),
        })
    }

    /// Demo schedule; `None` when the catalog failed to load.
    pub fn schedule(&self) -> Option<WeeklySchedule> {
        self.catalog().map(weekly_schedule)
    }
}

fn catalog_of(state: &CatalogState) -> &Catalog {
    match state {
        CatalogState::Loaded(catalog) => catalog,
        CatalogState::Failed(_) => &EMPTY_CATALOG,
    }
}
