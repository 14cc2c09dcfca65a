//! Lesson content formatting.
//!
//! # Responsibility
//! - Turn raw lesson content into display HTML behind a swappable trait.
//!
//! # Invariants
//! - Formatters escape source text before adding any markup.

pub mod content;
