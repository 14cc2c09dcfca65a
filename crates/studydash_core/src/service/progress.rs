//! Subject progress derivation.
//!
//! # Invariants
//! - `pct` is `0` for subjects without lessons.
//! - `pct` rounds half up and never exceeds `100`.

use crate::model::catalog::Subject;
use serde::Serialize;

/// Completion counts for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: usize,
    pub done_count: usize,
    pub pct: u32,
}

impl Progress {
    /// Builds a progress value from raw counts.
    pub fn from_counts(total: usize, done_count: usize) -> Self {
        Self {
            total,
            done_count,
            pct: percent(done_count, total),
        }
    }

    /// Card status: every lesson done.
    pub fn is_complete(&self) -> bool {
        self.pct >= 100
    }
}

/// Counts lessons of `subject` reported done by `is_done`.
///
/// Only lessons present in the catalog are counted; stale completion entries
/// for removed lessons are ignored.
pub fn progress<F>(subject: &Subject, is_done: F) -> Progress
where
    F: Fn(&str, &str) -> bool,
{
    let total = subject.lessons.len();
    let done_count = subject
        .lessons
        .iter()
        .filter(|lesson| is_done(subject.id.as_str(), lesson.id.as_str()))
        .count();
    Progress::from_counts(total, done_count)
}

fn percent(done_count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let done = done_count.min(total) as u64;
    let total = total as u64;
    ((done * 200 + total) / (2 * total)) as u32
}

#[cfg(test)]
mod tests {
    use super::{progress, Progress};
    use crate::model::catalog::{Lesson, Subject};

    fn subject(lesson_count: usize) -> Subject {
        Subject {
            id: "s".to_string(),
            name: "S".to_string(),
            description: String::new(),
            lessons: (0..lesson_count)
                .map(|idx| Lesson {
                    id: format!("l{idx}"),
                    title: format!("Lesson {idx}"),
                    tags: Vec::new(),
                    content: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_subject_has_zero_percent() {
        let value = progress(&subject(0), |_, _| true);
        assert_eq!(value, Progress::from_counts(0, 0));
        assert_eq!(value.pct, 0);
        assert!(!value.is_complete());
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(Progress::from_counts(8, 1).pct, 13);
        assert_eq!(Progress::from_counts(3, 1).pct, 33);
        assert_eq!(Progress::from_counts(3, 2).pct, 67);
        assert_eq!(Progress::from_counts(200, 1).pct, 1);
    }

    #[test]
    fn counts_only_done_lessons() {
        let value = progress(&subject(4), |_, lesson_id| lesson_id == "l1" || lesson_id == "l3");
        assert_eq!(value.total, 4);
        assert_eq!(value.done_count, 2);
        assert_eq!(value.pct, 50);
    }

    #[test]
    fn all_done_is_complete() {
        let value = progress(&subject(2), |_, _| true);
        assert_eq!(value.pct, 100);
        assert!(value.is_complete());
    }
}
