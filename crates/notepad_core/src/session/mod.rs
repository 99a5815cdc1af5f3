//! Note editor session: selection state and save reconciliation.
//!
//! # Responsibility
//! - Model the session as pure `(state, action) -> state` transitions.
//! - Partition the collection into insert/upsert batches on save.
//! - Dispatch save batches to a `RemoteStore` and report outcomes.
//!
//! # Invariants
//! - `0 <= active_index < notes.len()` after every transition.
//! - Local commits are never rolled back on store failure.

pub mod error;
pub mod picker;
pub mod reconcile;
pub mod selection;
pub mod state;
