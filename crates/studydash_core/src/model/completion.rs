//! Completion map model.
//!
//! # Invariants
//! - Absent subject or lesson entries read as `false`.
//! - Entries are only removed by a full `clear`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-subject, per-lesson completion flags.
///
/// Serialized as `{ "<subjectId>": { "<lessonId>": true } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionMap {
    entries: BTreeMap<String, BTreeMap<String, bool>>,
}

impl CompletionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored flag, or `false` when no entry exists.
    pub fn get(&self, subject_id: &str, lesson_id: &str) -> bool {
        self.entries
            .get(subject_id)
            .and_then(|lessons| lessons.get(lesson_id))
            .copied()
            .unwrap_or(false)
    }

    /// Upserts one flag.
    pub fn set(&mut self, subject_id: &str, lesson_id: &str, value: bool) {
        self.entries
            .entry(subject_id.to_string())
            .or_default()
            .insert(lesson_id.to_string(), value);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::CompletionMap;

    #[test]
    fn absent_entries_read_as_false() {
        let map = CompletionMap::new();
        assert!(!map.get("s1", "l1"));
    }

    #[test]
    fn serializes_as_nested_object() {
        let mut map = CompletionMap::new();
        map.set("s1", "l1", true);
        map.set("s1", "l2", false);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"s1":{"l1":true,"l2":false}}"#);
    }
}
