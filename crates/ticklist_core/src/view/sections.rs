//! Two-section partition snapshot and row addressing.
//!
//! # Responsibility
//! - Derive the current/completed slices from one list's tasks.
//! - Resolve tasks to row positions and back.
//!
//! # Invariants
//! - `current` holds exactly the incomplete tasks, `completed` exactly
//!   the complete ones; together they cover the list with no duplicates.
//! - Both slices preserve the repository's creation order.

use crate::model::task::{Task, TaskId};
use crate::model::task_list::TaskListId;
use crate::repo::task_repo::{RepoResult, TaskRepository};

/// Table section identity for the two fixed partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Incomplete tasks.
    Current,
    /// Completed tasks.
    Completed,
}

impl Section {
    /// Returns the section a task belongs to.
    pub fn of(task: &Task) -> Self {
        if task.is_complete {
            Self::Completed
        } else {
            Self::Current
        }
    }

    /// Returns the other section.
    pub fn opposite(self) -> Self {
        match self {
            Self::Current => Self::Completed,
            Self::Completed => Self::Current,
        }
    }
}

/// Position of one task row inside the two-section table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef {
    pub section: Section,
    pub row: usize,
}

/// Row-level change produced by one store mutation, for presentation
/// adapters that animate table updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    /// A new row appeared at the given position.
    Inserted(RowRef),
    /// An existing row changed in place.
    Reloaded(RowRef),
    /// The row at the given position disappeared.
    Removed(RowRef),
    /// A row switched sections. `to.row` is always 0: the toggled task
    /// is placed at the top of its new section. This is a placement
    /// policy for the table, not a persistence-order change.
    Moved { from: RowRef, to: RowRef },
}

/// Snapshot of one list partitioned into the two table sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionedTasks {
    current: Vec<Task>,
    completed: Vec<Task>,
}

impl SectionedTasks {
    /// Partitions tasks already in creation order.
    pub fn partition(tasks: Vec<Task>) -> Self {
        let (completed, current) = tasks.into_iter().partition(|task| task.is_complete);
        Self { current, completed }
    }

    /// Loads and partitions one list's tasks through the repository.
    pub fn load<R: TaskRepository>(repo: &R, list_uuid: TaskListId) -> RepoResult<Self> {
        Ok(Self::partition(repo.list_tasks(list_uuid)?))
    }

    /// Incomplete tasks in creation order.
    pub fn current(&self) -> &[Task] {
        &self.current
    }

    /// Completed tasks in creation order.
    pub fn completed(&self) -> &[Task] {
        &self.completed
    }

    /// Tasks of one section in creation order.
    pub fn section(&self, section: Section) -> &[Task] {
        match section {
            Section::Current => &self.current,
            Section::Completed => &self.completed,
        }
    }

    /// Total task count across both sections.
    pub fn len(&self) -> usize {
        self.current.len() + self.completed.len()
    }

    /// Returns whether the list has no tasks at all.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.completed.is_empty()
    }

    /// Resolves a row position to its task.
    pub fn task_at(&self, at: RowRef) -> Option<&Task> {
        self.section(at.section).get(at.row)
    }

    /// Finds the row currently holding the given task.
    pub fn locate(&self, task_uuid: TaskId) -> Option<RowRef> {
        for section in [Section::Current, Section::Completed] {
            if let Some(row) = self
                .section(section)
                .iter()
                .position(|task| task.uuid == task_uuid)
            {
                return Some(RowRef { section, row });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{RowRef, Section, SectionedTasks};
    use crate::model::task::Task;
    use uuid::Uuid;

    fn task(title: &str, sort_order: i64, is_complete: bool) -> Task {
        Task {
            uuid: Uuid::new_v4(),
            list_uuid: Uuid::nil(),
            title: title.to_string(),
            note: String::new(),
            is_complete,
            sort_order,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn partition_splits_by_completion_and_keeps_order() {
        let a = task("a", 0, false);
        let b = task("b", 1, true);
        let c = task("c", 2, false);
        let sections =
            SectionedTasks::partition(vec![a.clone(), b.clone(), c.clone()]);

        let current_ids: Vec<_> = sections.current().iter().map(|t| t.uuid).collect();
        let completed_ids: Vec<_> = sections.completed().iter().map(|t| t.uuid).collect();
        assert_eq!(current_ids, vec![a.uuid, c.uuid]);
        assert_eq!(completed_ids, vec![b.uuid]);
        assert_eq!(sections.len(), 3);
    }

    #[test]
    fn locate_and_task_at_are_inverse() {
        let a = task("a", 0, false);
        let b = task("b", 1, true);
        let sections = SectionedTasks::partition(vec![a.clone(), b.clone()]);

        let at = sections.locate(b.uuid).expect("b should be present");
        assert_eq!(
            at,
            RowRef {
                section: Section::Completed,
                row: 0
            }
        );
        assert_eq!(sections.task_at(at), Some(&b));
        assert_eq!(sections.locate(Uuid::new_v4()), None);
    }

    #[test]
    fn empty_partition_reports_empty() {
        let sections = SectionedTasks::partition(Vec::new());
        assert!(sections.is_empty());
        assert_eq!(sections.len(), 0);
    }
}
