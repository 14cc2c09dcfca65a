//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable key-value contract used by the stores.
//! - Isolate SQLite query details from store/business orchestration.
//!
//! # Invariants
//! - Each persisted entry is one named row; writes overwrite the whole value.
//! - Unreadable persisted values are converted to defaults at this boundary.

pub mod kv_repo;
