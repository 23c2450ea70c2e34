//! Task use-case service.
//!
//! # Responsibility
//! - Provide the single write entry point for task mutations.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence
//!   contracts.
//! - Service layer remains storage-agnostic.

use crate::model::task::{Task, TaskId};
use crate::model::task_list::TaskListId;
use crate::repo::task_repo::{RepoResult, TaskRepository};

/// Use-case facade for task CRUD and completion toggling.
///
/// One explicitly-constructed instance is handed by reference to
/// whatever drives the presentation layer; there is no global
/// singleton.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Appends a new incomplete task to the given list.
    ///
    /// # Contract
    /// - Fails with a validation error when the title is blank after
    ///   trimming; the store is left unchanged.
    /// - Returns the persisted task, `is_complete == false`.
    pub fn create_task(
        &self,
        list_uuid: TaskListId,
        title: &str,
        note: &str,
    ) -> RepoResult<Task> {
        self.repo.create_task(list_uuid, title, note)
    }

    /// Rewrites title/note of an existing task in place.
    ///
    /// Returns repository-level not-found or validation errors
    /// unchanged. Never changes completion state.
    pub fn update_task(&self, task_uuid: TaskId, title: &str, note: &str) -> RepoResult<()> {
        self.repo.update_task(task_uuid, title, note)
    }

    /// Permanently removes one task from its owning list.
    pub fn delete_task(&self, task_uuid: TaskId) -> RepoResult<()> {
        self.repo.delete_task(task_uuid)
    }

    /// Flips the completion flag and returns the updated task.
    pub fn toggle_complete(&self, task_uuid: TaskId) -> RepoResult<Task> {
        self.repo.toggle_complete(task_uuid)
    }

    /// Loads one task by stable id.
    pub fn get_task(&self, task_uuid: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(task_uuid)
    }

    /// Lists all tasks of one list in creation order.
    pub fn list_tasks(&self, list_uuid: TaskListId) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks(list_uuid)
    }
}
