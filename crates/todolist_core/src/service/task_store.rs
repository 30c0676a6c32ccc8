//! Authoritative task list state and mutation operations.
//!
//! # Responsibility
//! - Own the ordered task list and the active filter selection.
//! - Apply mutations as pure list transforms followed by a snapshot sync.
//!
//! # Invariants
//! - Task ids in the list are pairwise distinct at all times.
//! - Every settled mutation is followed synchronously by a snapshot write;
//!   the durable state is never more than one mutation behind.
//! - The filtered view is recomputed on every read, never cached.

use crate::model::filter::Filter;
use crate::model::task::{validate_name, Task, TaskId, TaskNameError};
use crate::repo::snapshot_repo::{RepoResult, SnapshotRepository};
use log::{debug, error, info};

/// Task list store over an injected snapshot repository.
///
/// Single-writer by construction: the list and filter are private and only
/// reachable through the methods below.
pub struct TaskStore<R: SnapshotRepository> {
    repo: R,
    tasks: Vec<Task>,
    filter: Filter,
}

impl<R: SnapshotRepository> TaskStore<R> {
    /// Opens a store, restoring the task list from the repository.
    ///
    /// A missing or malformed snapshot restores as an empty list (the
    /// repository fails open); only transport errors propagate.
    pub fn open(repo: R) -> RepoResult<Self> {
        let tasks = repo.load()?;
        info!(
            "event=store_open module=service status=ok restored_tasks={}",
            tasks.len()
        );
        Ok(Self {
            repo,
            tasks,
            filter: Filter::default(),
        })
    }

    /// Appends a new incomplete task and returns its id.
    ///
    /// # Errors
    /// - `TaskNameError::Empty` when the name is empty or whitespace-only;
    ///   the list is left untouched.
    pub fn add_task(&mut self, name: &str) -> Result<TaskId, TaskNameError> {
        let name = validate_name(name)?;
        let task = Task::new(name);
        let id = task.id.clone();

        let mut next = self.tasks.clone();
        next.push(task);
        self.commit(next);

        debug!("event=task_add module=service status=ok id={id}");
        Ok(id)
    }

    /// Renames the task with the given id.
    ///
    /// Unknown ids are a silent no-op so retries from the presentation
    /// layer stay idempotent.
    ///
    /// # Errors
    /// - `TaskNameError::Empty` when the new name is empty or
    ///   whitespace-only; the list is left untouched.
    pub fn edit_task(&mut self, id: &TaskId, new_name: &str) -> Result<(), TaskNameError> {
        let new_name = validate_name(new_name)?;

        let next = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == *id {
                    task.renamed(new_name)
                } else {
                    task.clone()
                }
            })
            .collect();
        self.commit(next);

        debug!("event=task_edit module=service status=ok id={id}");
        Ok(())
    }

    /// Negates the completion flag of the task with the given id.
    ///
    /// Unknown ids are a silent no-op.
    pub fn toggle_task(&mut self, id: &TaskId) {
        let next = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == *id {
                    task.toggled()
                } else {
                    task.clone()
                }
            })
            .collect();
        self.commit(next);

        debug!("event=task_toggle module=service status=ok id={id}");
    }

    /// Removes the task with the given id, preserving the order of the rest.
    ///
    /// Unknown ids are a silent no-op.
    pub fn delete_task(&mut self, id: &TaskId) {
        let next = self
            .tasks
            .iter()
            .filter(|task| task.id != *id)
            .cloned()
            .collect();
        self.commit(next);

        debug!("event=task_delete module=service status=ok id={id}");
    }

    /// Replaces the active filter selection.
    ///
    /// The selection is session state only; it is not persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Returns the active filter selection.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Returns the full ordered task list.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the tasks visible under the active filter.
    ///
    /// Computed fresh on every call from (task list, filter selection);
    /// relative order is preserved.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// Returns the list heading for the active filter.
    ///
    /// Wording follows the original UI: `"3 taches à faire"`, singular
    /// `tache` when exactly one task is visible.
    pub fn heading(&self) -> String {
        let count = self.filtered_tasks().len();
        let noun = if count == 1 { "tache" } else { "taches" };
        format!("{count} {noun} à faire")
    }

    /// Installs `next` as the current list and syncs the snapshot.
    ///
    /// A write failure is reported and otherwise ignored; the in-memory
    /// list stays authoritative for the session.
    fn commit(&mut self, next: Vec<Task>) {
        self.tasks = next;
        if let Err(err) = self.repo.save(&self.tasks) {
            error!(
                "event=snapshot_save module=service status=error task_count={} error={}",
                self.tasks.len(),
                err
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::model::filter::Filter;
    use crate::model::task::{Task, TaskId, TaskNameError};
    use crate::repo::snapshot_repo::{MemorySnapshotRepository, SnapshotRepository};
    use std::collections::HashSet;

    fn empty_store() -> TaskStore<MemorySnapshotRepository> {
        TaskStore::open(MemorySnapshotRepository::new()).unwrap()
    }

    #[test]
    fn add_appends_incomplete_task_with_trimmed_name() {
        let mut store = empty_store();
        let id = store.add_task("  buy milk ").unwrap();

        assert_eq!(store.tasks().len(), 1);
        let task = &store.tasks()[0];
        assert_eq!(task.id, id);
        assert_eq!(task.name, "buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn add_rejects_blank_name_without_mutating() {
        let mut store = empty_store();
        assert_eq!(store.add_task("   "), Err(TaskNameError::Empty));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn edit_renames_only_the_matching_task() {
        let mut store = empty_store();
        let first = store.add_task("one").unwrap();
        let second = store.add_task("two").unwrap();

        store.edit_task(&first, "uno").unwrap();

        assert_eq!(store.tasks()[0].name, "uno");
        assert_eq!(store.tasks()[0].id, first);
        assert_eq!(store.tasks()[1].name, "two");
        assert_eq!(store.tasks()[1].id, second);
    }

    #[test]
    fn edit_unknown_id_is_a_no_op() {
        let mut store = empty_store();
        store.add_task("keep me").unwrap();
        let before = store.tasks().to_vec();

        store
            .edit_task(&TaskId::from_raw("todo-missing"), "ghost")
            .unwrap();

        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut store = empty_store();
        let id = store.add_task("flip").unwrap();

        store.toggle_task(&id);
        assert!(store.tasks()[0].completed);

        store.toggle_task(&id);
        assert!(!store.tasks()[0].completed);
    }

    #[test]
    fn delete_removes_exactly_one_and_preserves_order() {
        let mut store = empty_store();
        let a = store.add_task("a").unwrap();
        let b = store.add_task("b").unwrap();
        let c = store.add_task("c").unwrap();

        store.delete_task(&b);

        let ids: Vec<_> = store.tasks().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec![a, c]);

        store.delete_task(&TaskId::from_raw("todo-missing"));
        assert_eq!(store.tasks().len(), 2);
    }

    #[test]
    fn ids_stay_pairwise_distinct_across_mutations() {
        let mut store = empty_store();
        let mut ids = Vec::new();
        for n in 0..8 {
            ids.push(store.add_task(&format!("task {n}")).unwrap());
        }
        store.delete_task(&ids[3]);
        store.toggle_task(&ids[5]);
        store.edit_task(&ids[0], "renamed").unwrap();
        store.add_task("late arrival").unwrap();

        let unique: HashSet<_> = store.tasks().iter().map(|t| t.id.clone()).collect();
        assert_eq!(unique.len(), store.tasks().len());
    }

    #[test]
    fn filtered_view_follows_the_selection() {
        let mut store = empty_store();
        let open = store.add_task("open").unwrap();
        let done = store.add_task("done").unwrap();
        store.toggle_task(&done);

        store.set_filter(Filter::Active);
        let active: Vec<_> = store.filtered_tasks().iter().map(|t| &t.id).collect();
        assert_eq!(active, vec![&open]);

        store.set_filter(Filter::Completed);
        let completed: Vec<_> = store.filtered_tasks().iter().map(|t| &t.id).collect();
        assert_eq!(completed, vec![&done]);

        store.set_filter(Filter::All);
        assert_eq!(store.filtered_tasks().len(), 2);
    }

    #[test]
    fn heading_counts_the_filtered_view_with_plural_rules() {
        let mut store = empty_store();
        assert_eq!(store.heading(), "0 taches à faire");

        let id = store.add_task("only one").unwrap();
        assert_eq!(store.heading(), "1 tache à faire");

        store.add_task("second").unwrap();
        assert_eq!(store.heading(), "2 taches à faire");

        store.toggle_task(&id);
        store.set_filter(Filter::Completed);
        assert_eq!(store.heading(), "1 tache à faire");
    }

    #[test]
    fn every_mutation_syncs_the_snapshot() {
        let repo = MemorySnapshotRepository::new();
        let mut store = TaskStore::open(repo).unwrap();

        let id = store.add_task("persist me").unwrap();
        store.toggle_task(&id);
        store.edit_task(&id, "persisted").unwrap();

        let raw = store.repo.raw().expect("snapshot should exist");
        let persisted: Vec<Task> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, store.tasks());

        store.delete_task(&id);
        let raw = store.repo.raw().expect("snapshot should exist");
        assert_eq!(raw, "[]");
    }

    #[test]
    fn open_with_malformed_snapshot_starts_empty() {
        let repo = MemorySnapshotRepository::with_raw("not an array");
        let store = TaskStore::open(repo).unwrap();
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn open_restores_prior_state() {
        let repo = MemorySnapshotRepository::new();
        repo.save(&[Task::with_id(TaskId::from_raw("todo-1"), "restored")])
            .unwrap();

        let store = TaskStore::open(repo).unwrap();
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].name, "restored");
    }
}
