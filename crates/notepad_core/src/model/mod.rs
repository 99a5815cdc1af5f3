//! Domain model for the note editor session.
//!
//! # Responsibility
//! - Define the note value type shared by the session and store layers.
//! - Define the ordered note sequence and its structural operations.
//!
//! # Invariants
//! - A note with `id == None` has never been persisted.
//! - Position 0 of a collection is the most recently touched note.

pub mod collection;
pub mod note;
