//! Stateful projection of one list for a two-section table view.
//!
//! # Responsibility
//! - Keep the section snapshot consistent with the store after every
//!   mutation performed through the board.
//! - Translate each mutation into one `RowEvent` the adapter can apply.
//!
//! # Invariants
//! - `sections()` reflects the store state as of the last board
//!   operation; the board reloads before any read that follows a
//!   mutation.
//! - A toggled task always lands at row 0 of its new section in the
//!   reported event; the persisted creation order never changes.
//! - Toggling is symmetric: done and undone both re-derive their own
//!   section from the store.

use crate::model::task::{Task, TaskId};
use crate::model::task_list::TaskListId;
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use crate::service::task_service::TaskService;
use crate::view::sections::{RowEvent, RowRef, Section, SectionedTasks};
use log::debug;

/// Live two-section view over one list, backed by a task service.
///
/// Presentation adapters hold one board per visible list, forward user
/// intents to it, and apply the returned row events to the table.
pub struct TaskBoard<R: TaskRepository> {
    service: TaskService<R>,
    list_uuid: TaskListId,
    sections: SectionedTasks,
}

impl<R: TaskRepository> TaskBoard<R> {
    /// Opens a board for one list and loads its initial snapshot.
    pub fn open(service: TaskService<R>, list_uuid: TaskListId) -> RepoResult<Self> {
        let sections = SectionedTasks::partition(service.list_tasks(list_uuid)?);
        Ok(Self {
            service,
            list_uuid,
            sections,
        })
    }

    /// The list this board projects.
    pub fn list_uuid(&self) -> TaskListId {
        self.list_uuid
    }

    /// Current two-section snapshot.
    pub fn sections(&self) -> &SectionedTasks {
        &self.sections
    }

    /// Re-derives the snapshot from the store.
    ///
    /// Needed only when the store was mutated outside this board; the
    /// board's own operations reload automatically.
    pub fn reload(&mut self) -> RepoResult<()> {
        self.sections = SectionedTasks::partition(self.service.list_tasks(self.list_uuid)?);
        Ok(())
    }

    /// Creates a task and reports where its row appeared.
    pub fn add_task(&mut self, title: &str, note: &str) -> RepoResult<(Task, RowEvent)> {
        let task = self.service.create_task(self.list_uuid, title, note)?;
        self.reload()?;

        // New tasks are incomplete, so the row lands at the end of the
        // current section.
        let at = self.sections.locate(task.uuid).unwrap_or(RowRef {
            section: Section::Current,
            row: 0,
        });
        debug!(
            "event=board_add module=view status=ok list={} task={} row={}",
            self.list_uuid, task.uuid, at.row
        );
        Ok((task, RowEvent::Inserted(at)))
    }

    /// Rewrites title/note and reports the row to refresh.
    pub fn edit_task(&mut self, task_uuid: TaskId, title: &str, note: &str) -> RepoResult<RowEvent> {
        self.locate_or_reload(task_uuid)?;
        self.service.update_task(task_uuid, title, note)?;
        self.reload()?;

        // Editing never changes sections, so the row is stable.
        let at = self
            .sections
            .locate(task_uuid)
            .ok_or(RepoError::NotFound(task_uuid))?;
        Ok(RowEvent::Reloaded(at))
    }

    /// Deletes a task and reports the row that disappeared.
    pub fn remove_task(&mut self, task_uuid: TaskId) -> RepoResult<RowEvent> {
        let from = self.locate_or_reload(task_uuid)?;
        self.service.delete_task(task_uuid)?;
        self.reload()?;
        Ok(RowEvent::Removed(from))
    }

    /// Flips completion and reports the section move.
    ///
    /// The reported target row is always 0 in the opposite section,
    /// matching the table's top-of-section placement for toggled rows.
    pub fn toggle_task(&mut self, task_uuid: TaskId) -> RepoResult<RowEvent> {
        let from = self.locate_or_reload(task_uuid)?;
        let updated = self.service.toggle_complete(task_uuid)?;
        self.reload()?;

        let to = RowRef {
            section: Section::of(&updated),
            row: 0,
        };
        debug!(
            "event=board_toggle module=view status=ok list={} task={} complete={}",
            self.list_uuid, task_uuid, updated.is_complete
        );
        Ok(RowEvent::Moved { from, to })
    }

    /// Resolves a task to its row, refreshing once when the cached
    /// snapshot is stale.
    fn locate_or_reload(&mut self, task_uuid: TaskId) -> RepoResult<RowRef> {
        if let Some(at) = self.sections.locate(task_uuid) {
            return Ok(at);
        }
        self.reload()?;
        self.sections
            .locate(task_uuid)
            .ok_or(RepoError::NotFound(task_uuid))
    }
}
