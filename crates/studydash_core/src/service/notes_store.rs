//! Persisted free-text notes store.
//!
//! # Invariants
//! - Every update overwrites [`NOTES_KEY`]; last write wins.
//! - Absent or corrupt persisted notes load as `""`.

use crate::repo::kv_repo::{load_json_or_default, save_json, KvRepository, RepoResult};
use log::debug;

/// Storage entry holding the JSON-encoded notes string.
pub const NOTES_KEY: &str = "study_dash_notes_v2";

/// Single notes string backed by a key-value repository.
pub struct NotesStore<R: KvRepository> {
    repo: R,
    text: String,
}

impl<R: KvRepository> NotesStore<R> {
    pub fn open(repo: R) -> Self {
        let text: String = load_json_or_default(&repo, NOTES_KEY);
        Self { repo, text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the notes and persists immediately.
    pub fn update(&mut self, text: impl Into<String>) -> RepoResult<()> {
        self.text = text.into();
        save_json(&self.repo, NOTES_KEY, &self.text)?;
        debug!(
            "event=notes_update module=service status=ok chars={}",
            self.text.chars().count()
        );
        Ok(())
    }

    /// Appends one line, separating it from existing text with a newline.
    pub fn append_line(&mut self, line: &str) -> RepoResult<()> {
        let mut next = self.text.clone();
        if !next.is_empty() && !next.ends_with('\n') {
            next.push('\n');
        }
        next.push_str(line);
        self.update(next)
    }
}
