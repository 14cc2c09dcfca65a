//! Domain model for the study catalog and per-lesson completion state.
//!
//! # Responsibility
//! - Define the catalog shapes decoded from the static resource.
//! - Define the completion map persisted between sessions.
//!
//! # Invariants
//! - Catalog values are immutable after load; ordering is authoritative.
//! - Completion entries default to `false` when absent.

pub mod catalog;
pub mod completion;
