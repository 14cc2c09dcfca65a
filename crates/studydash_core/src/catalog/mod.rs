//! Catalog loading boundary.
//!
//! # Responsibility
//! - Fetch the static catalog resource from a file or an HTTP URL.
//! - Decode the JSON document into [`crate::model::catalog::Catalog`].
//!
//! # Invariants
//! - Every load reads the resource fresh; nothing is cached.
//! - Failures are returned as values; loading never panics.

pub mod loader;
