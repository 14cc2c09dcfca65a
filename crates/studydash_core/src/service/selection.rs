//! Active subject/lesson selection state machine.
//!
//! # Responsibility
//! - Track which subject is open and which lesson is being viewed.
//! - Apply navigation transitions against the loaded catalog.
//!
//! # Invariants
//! - `LessonOpen` always names a lesson that belongs to its subject.
//! - Transitions targeting ids missing from the catalog are no-ops.
//! - There is no terminal state.

use crate::model::catalog::{Catalog, Lesson, Subject};

/// Current navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    NoSubject,
    SubjectOpen {
        subject_id: String,
    },
    LessonOpen {
        subject_id: String,
        lesson_id: String,
    },
}

impl Selection {
    /// First catalog subject open, or `NoSubject` for an empty catalog.
    pub fn initial(catalog: &Catalog) -> Self {
        match catalog.first_subject() {
            Some(subject) => Self::SubjectOpen {
                subject_id: subject.id.clone(),
            },
            None => Self::NoSubject,
        }
    }

    pub fn subject_id(&self) -> Option<&str> {
        match self {
            Self::NoSubject => None,
            Self::SubjectOpen { subject_id } | Self::LessonOpen { subject_id, .. } => {
                Some(subject_id.as_str())
            }
        }
    }

    pub fn lesson_id(&self) -> Option<&str> {
        match self {
            Self::LessonOpen { lesson_id, .. } => Some(lesson_id.as_str()),
            _ => None,
        }
    }

    /// Resolves the open subject against `catalog`.
    pub fn active_subject<'c>(&self, catalog: &'c Catalog) -> Option<&'c Subject> {
        self.subject_id()
            .and_then(|subject_id| catalog.subject(subject_id))
    }

    /// Resolves the viewed lesson; `None` unless the pairing exists.
    pub fn active_lesson<'c>(&self, catalog: &'c Catalog) -> Option<(&'c Subject, &'c Lesson)> {
        let Self::LessonOpen {
            subject_id,
            lesson_id,
        } = self
        else {
            return None;
        };
        let subject = catalog.subject(subject_id)?;
        let lesson = subject.lesson(lesson_id)?;
        Some((subject, lesson))
    }

    /// Opens a subject, dropping any viewed lesson.
    ///
    /// Returns `false` and leaves the state unchanged when the subject is
    /// unknown.
    pub fn open_subject(&mut self, catalog: &Catalog, subject_id: &str) -> bool {
        let Some(subject) = catalog.subject(subject_id) else {
            return false;
        };
        *self = Self::SubjectOpen {
            subject_id: subject.id.clone(),
        };
        true
    }

    /// Opens a lesson of `subject_id`.
    ///
    /// `lesson_id = None` falls back to the first lesson of the subject.
    /// Unknown subjects, unknown lessons and lesson-less subjects leave the
    /// state unchanged and return `false`.
    pub fn open_lesson(
        &mut self,
        catalog: &Catalog,
        subject_id: &str,
        lesson_id: Option<&str>,
    ) -> bool {
        let Some(subject) = catalog.subject(subject_id) else {
            return false;
        };
        let lesson = match lesson_id {
            Some(lesson_id) => subject.lesson(lesson_id),
            None => subject.first_lesson(),
        };
        let Some(lesson) = lesson else {
            return false;
        };

        *self = Self::LessonOpen {
            subject_id: subject.id.clone(),
            lesson_id: lesson.id.clone(),
        };
        true
    }

    /// Returns from a viewed lesson to its subject.
    pub fn close_lesson(&mut self) -> bool {
        let Self::LessonOpen { subject_id, .. } = self else {
            return false;
        };
        let subject_id = std::mem::take(subject_id);
        *self = Self::SubjectOpen { subject_id };
        true
    }

    /// Opens the first unfinished lesson of the active subject.
    ///
    /// Falls back to the first lesson when everything is done; no-op when
    /// no subject is open or the subject has no lessons.
    pub fn open_next_unfinished<F>(&mut self, catalog: &Catalog, is_done: F) -> bool
    where
        F: Fn(&str, &str) -> bool,
    {
        let Some(subject) = self.active_subject(catalog) else {
            return false;
        };
        let next = subject
            .lessons
            .iter()
            .find(|lesson| !is_done(subject.id.as_str(), lesson.id.as_str()))
            .or_else(|| subject.first_lesson());
        let Some(next) = next else {
            return false;
        };

        self.open_lesson(catalog, &subject.id, Some(&next.id))
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use crate::model::catalog::{Catalog, Lesson, Subject};

    fn catalog() -> Catalog {
        let lesson = |id: &str| Lesson {
            id: id.to_string(),
            title: id.to_uppercase(),
            tags: Vec::new(),
            content: String::new(),
        };
        Catalog::new(vec![
            Subject {
                id: "s1".to_string(),
                name: "One".to_string(),
                description: String::new(),
                lessons: vec![lesson("l1"), lesson("l2")],
            },
            Subject {
                id: "empty".to_string(),
                name: "Empty".to_string(),
                description: String::new(),
                lessons: Vec::new(),
            },
        ])
    }

    #[test]
    fn initial_state_opens_first_subject() {
        assert_eq!(
            Selection::initial(&catalog()),
            Selection::SubjectOpen {
                subject_id: "s1".to_string()
            }
        );
        assert_eq!(Selection::initial(&Catalog::default()), Selection::NoSubject);
    }

    #[test]
    fn open_subject_clears_lesson() {
        let catalog = catalog();
        let mut selection = Selection::initial(&catalog);
        assert!(selection.open_lesson(&catalog, "s1", Some("l2")));
        assert!(selection.open_subject(&catalog, "empty"));
        assert_eq!(selection.lesson_id(), None);
        assert_eq!(selection.subject_id(), Some("empty"));
    }

    #[test]
    fn unknown_targets_are_ignored() {
        let catalog = catalog();
        let mut selection = Selection::initial(&catalog);
        let before = selection.clone();

        assert!(!selection.open_subject(&catalog, "missing"));
        assert!(!selection.open_lesson(&catalog, "s1", Some("missing")));
        assert!(!selection.open_lesson(&catalog, "missing", None));
        assert!(!selection.open_lesson(&catalog, "empty", None));
        assert_eq!(selection, before);
    }

    #[test]
    fn close_lesson_returns_to_subject() {
        let catalog = catalog();
        let mut selection = Selection::initial(&catalog);
        assert!(!selection.close_lesson());
        selection.open_lesson(&catalog, "s1", None);
        assert!(selection.close_lesson());
        assert_eq!(
            selection,
            Selection::SubjectOpen {
                subject_id: "s1".to_string()
            }
        );
    }

    #[test]
    fn next_unfinished_is_noop_without_lessons() {
        let catalog = catalog();
        let mut selection = Selection::NoSubject;
        assert!(!selection.open_next_unfinished(&catalog, |_, _| false));

        selection.open_subject(&catalog, "empty");
        assert!(!selection.open_next_unfinished(&catalog, |_, _| false));
        assert_eq!(selection.lesson_id(), None);
    }
}
