//! Session use-case services.
//!
//! # Responsibility
//! - Pair the pure session transitions with a `RemoteStore`.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod note_session;
