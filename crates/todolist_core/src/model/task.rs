//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted in list snapshots.
//! - Provide copy-producing helpers for rename and completion toggling.
//!
//! # Invariants
//! - `id` is assigned at creation and never changes for the task lifetime.
//! - `completed` starts as `false` for every newly created task.
//! - Task names are non-empty after trimming (enforced by `validate_name`).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Prefix prepended to every generated task identifier.
const TASK_ID_PREFIX: &str = "todo-";

/// Stable opaque identifier for a task.
///
/// Kept as a newtype over the serialized string form so snapshots written by
/// earlier builds (or by hand) round-trip byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh identifier, unique within the application lifetime.
    pub fn generate() -> Self {
        Self(format!("{TASK_ID_PREFIX}{}", Uuid::new_v4()))
    }

    /// Wraps an identifier that already exists in persisted state.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the serialized string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation error for user-supplied task names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskNameError {
    Empty,
}

impl Display for TaskNameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "task name must not be empty"),
        }
    }
}

impl Error for TaskNameError {}

/// Validates a user-supplied task name.
///
/// Returns the trimmed name on success.
///
/// # Errors
/// - `TaskNameError::Empty` when the name is empty or whitespace-only.
pub fn validate_name(name: &str) -> Result<&str, TaskNameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TaskNameError::Empty);
    }
    Ok(trimmed)
}

/// A single to-do item.
///
/// The serde shape (`id`, `name`, `completed`) is the snapshot wire format;
/// renaming fields is a breaking change for persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier, unique within the task list.
    pub id: TaskId,
    /// User-supplied display name.
    pub name: String,
    /// Completion flag toggled by the user.
    pub completed: bool,
}

impl Task {
    /// Creates a new incomplete task with a generated identifier.
    ///
    /// The caller is expected to have validated the name via `validate_name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(TaskId::generate(), name)
    }

    /// Creates a task with a caller-provided identifier.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }

    /// Returns a copy of this task with the given name.
    ///
    /// `id` and `completed` are preserved.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            name: name.into(),
            completed: self.completed,
        }
    }

    /// Returns a copy of this task with the completion flag negated.
    pub fn toggled(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            completed: !self.completed,
        }
    }
}
