//! Substring lesson filter.
//!
//! # Responsibility
//! - Match a normalized query against title, tags and content of lessons.
//!
//! # Invariants
//! - Output preserves input order and never mutates the input.
//! - Blank queries match every lesson.
//! - Matching is a case-insensitive substring test; no tokenization.

use crate::model::catalog::Lesson;

/// Normalized search input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonQuery {
    needle: String,
}

impl LessonQuery {
    /// Trims and lowercases raw user input.
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    /// Whether this query accepts every lesson.
    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Tests one lesson against this query.
    pub fn matches(&self, lesson: &Lesson) -> bool {
        self.is_blank() || lesson_haystack(lesson).contains(self.needle.as_str())
    }
}

/// Filters `lessons` by `query`, keeping original order.
pub fn filter_lessons<'a>(lessons: &'a [Lesson], query: &str) -> Vec<&'a Lesson> {
    let query = LessonQuery::new(query);
    lessons
        .iter()
        .filter(|lesson| query.matches(lesson))
        .collect()
}

/// Lowercased `title tags content` text used for matching.
pub fn lesson_haystack(lesson: &Lesson) -> String {
    format!(
        "{} {} {}",
        lesson.title,
        lesson.tags.join(" "),
        lesson.content
    )
    .to_lowercase()
}
