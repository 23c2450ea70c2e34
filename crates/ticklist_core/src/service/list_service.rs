//! Task list use-case service.
//!
//! # Responsibility
//! - Provide use-case entry points for the lists overview screen.
//! - Delegate persistence to repository implementations.

use crate::model::task_list::{TaskList, TaskListId};
use crate::repo::list_repo::{ListRepository, ListSort, ListSummary};
use crate::repo::task_repo::RepoResult;

/// Use-case facade for list-level operations.
pub struct ListService<R: ListRepository> {
    repo: R,
}

impl<R: ListRepository> ListService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one empty list.
    pub fn create_list(&self, title: &str) -> RepoResult<TaskList> {
        self.repo.create_list(title)
    }

    /// Renames an existing list.
    pub fn rename_list(&self, list_uuid: TaskListId, title: &str) -> RepoResult<()> {
        self.repo.rename_list(list_uuid, title)
    }

    /// Removes one list and every task it owns.
    pub fn delete_list(&self, list_uuid: TaskListId) -> RepoResult<()> {
        self.repo.delete_list(list_uuid)
    }

    /// Loads one list by stable id.
    pub fn get_list(&self, list_uuid: TaskListId) -> RepoResult<Option<TaskList>> {
        self.repo.get_list(list_uuid)
    }

    /// Lists all task lists in the requested order.
    pub fn list_lists(&self, sort: ListSort) -> RepoResult<Vec<TaskList>> {
        self.repo.list_lists(sort)
    }

    /// Marks every task of the list complete in one step.
    pub fn complete_all(&self, list_uuid: TaskListId) -> RepoResult<usize> {
        self.repo.complete_all(list_uuid)
    }

    /// Returns completion counts for one list's overview row.
    pub fn completion_summary(&self, list_uuid: TaskListId) -> RepoResult<ListSummary> {
        self.repo.completion_summary(list_uuid)
    }
}
