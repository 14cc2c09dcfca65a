//! Lesson search entry points.
//!
//! # Responsibility
//! - Derive the visible lesson subset for a free-text query.
//! - Keep matching rules inside core so every front end filters alike.

pub mod filter;
