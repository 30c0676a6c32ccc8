//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate snapshot repository calls into task-list operations.
//! - Keep presentation layers decoupled from storage details.

pub mod task_store;
