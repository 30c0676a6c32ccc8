//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the snapshot load/save contract consumed by the task store.
//! - Isolate SQLite and serialization details from service orchestration.
//!
//! # Invariants
//! - `save` always overwrites the full snapshot under the single well-known
//!   key; there are no partial writes.
//! - `load` fails open on malformed snapshot content (empty list), and fails
//!   closed only on transport errors.

pub mod snapshot_repo;
