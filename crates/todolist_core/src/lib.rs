//! Core domain logic for the to-do list.
//! This crate is the single source of truth for task-list invariants and
//! the snapshot persistence contract.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::Filter;
pub use model::task::{validate_name, Task, TaskId, TaskNameError};
pub use repo::snapshot_repo::{
    MemorySnapshotRepository, RepoError, RepoResult, SnapshotRepository,
    SqliteSnapshotRepository, SNAPSHOT_KEY,
};
pub use service::task_store::TaskStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
