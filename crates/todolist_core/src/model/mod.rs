//! Domain model for the to-do task list.
//!
//! # Responsibility
//! - Define the canonical task record and its identifier type.
//! - Define the closed set of list filters and their predicates.
//!
//! # Invariants
//! - Every task is identified by a stable, unique `TaskId`.
//! - Task values are replaced by structural copies, never mutated in place.

pub mod filter;
pub mod task;
