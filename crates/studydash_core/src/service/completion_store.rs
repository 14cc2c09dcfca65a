//! Persisted per-lesson completion store.
//!
//! # Responsibility
//! - Answer `is_done` lookups for (subject, lesson) pairs.
//! - Persist the whole completion map after every mutation.
//!
//! # Invariants
//! - Absent entries read as `false`; lookups never fail.
//! - Every successful mutation is followed by a whole-map overwrite of
//!   [`COMPLETION_KEY`].
//! - `reset_all` clears memory and storage unconditionally.

use crate::model::completion::CompletionMap;
use crate::repo::kv_repo::{load_json_or_default, save_json, KvRepository, RepoResult};
use log::{debug, info};

/// Storage entry holding the serialized completion map.
pub const COMPLETION_KEY: &str = "study_dash_done_v2";

/// Completion flags backed by a key-value repository.
pub struct CompletionStore<R: KvRepository> {
    repo: R,
    map: CompletionMap,
}

impl<R: KvRepository> CompletionStore<R> {
    /// Loads the persisted map, falling back to empty when absent or corrupt.
    pub fn open(repo: R) -> Self {
        let map: CompletionMap = load_json_or_default(&repo, COMPLETION_KEY);
        debug!(
            "event=completion_load module=service status=ok empty={}",
            map.is_empty()
        );
        Self { repo, map }
    }

    pub fn is_done(&self, subject_id: &str, lesson_id: &str) -> bool {
        self.map.get(subject_id, lesson_id)
    }

    /// Upserts one flag and persists the entire map.
    pub fn set_done(&mut self, subject_id: &str, lesson_id: &str, value: bool) -> RepoResult<()> {
        self.map.set(subject_id, lesson_id, value);
        save_json(&self.repo, COMPLETION_KEY, &self.map)?;
        debug!("event=completion_set module=service status=ok value={value}");
        Ok(())
    }

    /// Flips one flag, persists, and returns the new value.
    pub fn toggle(&mut self, subject_id: &str, lesson_id: &str) -> RepoResult<bool> {
        let next = !self.is_done(subject_id, lesson_id);
        self.set_done(subject_id, lesson_id, next)?;
        Ok(next)
    }

    /// Clears every flag in memory and removes the persisted entry.
    ///
    /// Confirmation belongs to the caller.
    pub fn reset_all(&mut self) -> RepoResult<()> {
        self.map.clear();
        self.repo.remove(COMPLETION_KEY)?;
        info!("event=completion_reset module=service status=ok");
        Ok(())
    }

    /// Read-only view of the in-memory map.
    pub fn snapshot(&self) -> &CompletionMap {
        &self.map
    }
}
