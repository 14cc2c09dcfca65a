//! Subject/lesson catalog model.
//!
//! # Responsibility
//! - Mirror the JSON catalog resource (`{ subjects: [...] }`).
//! - Provide id-based lookups that never fail loudly.
//!
//! # Invariants
//! - `Subject::id` is unique in the catalog; `Lesson::id` is unique within
//!   its subject.
//! - Subject and lesson order is the order of the loaded resource.

use serde::{Deserialize, Serialize};

/// A course/topic with an ordered list of lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Stable identifier referenced by persisted completion entries.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl Subject {
    /// Finds a lesson of this subject by id.
    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id == lesson_id)
    }

    /// Returns the first lesson in catalog order.
    pub fn first_lesson(&self) -> Option<&Lesson> {
        self.lessons.first()
    }
}

/// A single content unit within a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    /// Display order is preserved as loaded.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Markdown-ish body text.
    #[serde(default)]
    pub content: String,
}

/// Immutable catalog loaded once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl Catalog {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    /// Finds a subject by id.
    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects
            .iter()
            .find(|subject| subject.id == subject_id)
    }

    /// Resolves a lesson only when it belongs to the given subject.
    pub fn lesson(&self, subject_id: &str, lesson_id: &str) -> Option<&Lesson> {
        self.subject(subject_id)
            .and_then(|subject| subject.lesson(lesson_id))
    }

    /// Returns the first subject in catalog order.
    pub fn first_subject(&self) -> Option<&Subject> {
        self.subjects.first()
    }
}
