//! List filter selector.
//!
//! # Responsibility
//! - Define the closed set of named views over the task list.
//! - Map each filter to its task predicate.
//!
//! # Invariants
//! - Exactly one filter is active at a time (owned by the task store).
//! - The set is closed: unknown names are rejected at the string boundary.

use crate::model::task::Task;

/// Named view over the task list.
///
/// A tagged enum rather than open string keys, so every dispatch site gets
/// compile-time exhaustiveness checking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    /// Every task, completed or not.
    #[default]
    All,
    /// Tasks still to be done.
    Active,
    /// Tasks already completed.
    Completed,
}

impl Filter {
    /// All filters in presentation order.
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Returns the user-facing label.
    ///
    /// Labels match the original UI, which ships the localized `Complète`
    /// for the completed view.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Complète",
        }
    }

    /// Parses a filter name from the closed set.
    ///
    /// Matching is case-insensitive. The completed view accepts the
    /// localized label plus the ASCII aliases `complete`/`completed`.
    /// Returns `None` for anything outside the set.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "complète" | "complete" | "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Returns whether `task` belongs to this view.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}
