//! Core use-case services.
//!
//! # Responsibility
//! - Own the persisted stores and the derived dashboard computations.
//! - Keep front ends decoupled from storage and catalog details.

pub mod completion_store;
pub mod dashboard;
pub mod notes_store;
pub mod progress;
pub mod schedule;
pub mod selection;
