//! Task list repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for the lists that own tasks.
//! - Own cascade-delete and bulk-completion semantics.
//!
//! # Invariants
//! - Deleting a list removes every owned task in the same statement
//!   (`ON DELETE CASCADE`); no orphan tasks survive.
//! - `complete_all` flips every remaining task in one atomic statement.
//! - List ordering is deterministic for both sort modes.

use crate::model::task_list::{normalize_list_title, TaskList, TaskListId};
use crate::repo::task_repo::{
    ensure_store_connection_ready, list_exists, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const LIST_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    created_at,
    updated_at
FROM task_lists";

/// Sort modes for the lists overview screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListSort {
    /// Oldest list first.
    #[default]
    CreatedAt,
    /// Alphabetical, case-insensitive.
    Title,
}

/// Per-list completion counts for overview rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSummary {
    /// Total tasks owned by the list.
    pub total: u32,
    /// Tasks still incomplete.
    pub remaining: u32,
}

impl ListSummary {
    /// Returns whether the list has tasks and all of them are complete.
    pub fn all_done(&self) -> bool {
        self.total > 0 && self.remaining == 0
    }
}

/// Repository interface for task list operations.
pub trait ListRepository {
    /// Creates one empty list and returns the persisted row.
    fn create_list(&self, title: &str) -> RepoResult<TaskList>;
    /// Renames an existing list.
    fn rename_list(&self, list_uuid: TaskListId, title: &str) -> RepoResult<()>;
    /// Permanently removes one list and every task it owns.
    fn delete_list(&self, list_uuid: TaskListId) -> RepoResult<()>;
    /// Loads one list by id.
    fn get_list(&self, list_uuid: TaskListId) -> RepoResult<Option<TaskList>>;
    /// Lists all task lists in the requested order.
    fn list_lists(&self, sort: ListSort) -> RepoResult<Vec<TaskList>>;
    /// Marks every task of the list complete; returns how many rows
    /// changed.
    fn complete_all(&self, list_uuid: TaskListId) -> RepoResult<usize>;
    /// Returns completion counts for one list.
    fn completion_summary(&self, list_uuid: TaskListId) -> RepoResult<ListSummary>;
}

/// SQLite-backed task list repository.
pub struct SqliteListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteListRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_store_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ListRepository for SqliteListRepository<'_> {
    fn create_list(&self, title: &str) -> RepoResult<TaskList> {
        let title = normalize_list_title(title)?;
        let list_uuid = Uuid::new_v4();

        self.conn.execute(
            "INSERT INTO task_lists (uuid, title) VALUES (?1, ?2);",
            params![list_uuid.to_string(), title.as_str()],
        )?;

        load_required_list(self.conn, list_uuid)
    }

    fn rename_list(&self, list_uuid: TaskListId, title: &str) -> RepoResult<()> {
        let title = normalize_list_title(title)?;

        let changed = self.conn.execute(
            "UPDATE task_lists
             SET
                title = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![list_uuid.to_string(), title.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::ListNotFound(list_uuid));
        }

        Ok(())
    }

    fn delete_list(&self, list_uuid: TaskListId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM task_lists WHERE uuid = ?1;",
            [list_uuid.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::ListNotFound(list_uuid));
        }

        Ok(())
    }

    fn get_list(&self, list_uuid: TaskListId) -> RepoResult<Option<TaskList>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LIST_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([list_uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_list_row(row)?));
        }

        Ok(None)
    }

    fn list_lists(&self, sort: ListSort) -> RepoResult<Vec<TaskList>> {
        let order_clause = match sort {
            ListSort::CreatedAt => "ORDER BY created_at ASC, uuid ASC",
            ListSort::Title => "ORDER BY title COLLATE NOCASE ASC, uuid ASC",
        };
        let mut stmt = self
            .conn
            .prepare(&format!("{LIST_SELECT_SQL} {order_clause};"))?;

        let mut rows = stmt.query([])?;
        let mut lists = Vec::new();
        while let Some(row) = rows.next()? {
            lists.push(parse_list_row(row)?);
        }

        Ok(lists)
    }

    fn complete_all(&self, list_uuid: TaskListId) -> RepoResult<usize> {
        if !list_exists(self.conn, list_uuid)? {
            return Err(RepoError::ListNotFound(list_uuid));
        }

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                is_complete = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE list_uuid = ?1
               AND is_complete = 0;",
            [list_uuid.to_string()],
        )?;

        Ok(changed)
    }

    fn completion_summary(&self, list_uuid: TaskListId) -> RepoResult<ListSummary> {
        if !list_exists(self.conn, list_uuid)? {
            return Err(RepoError::ListNotFound(list_uuid));
        }

        let (total, completed): (u32, u32) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(is_complete), 0)
             FROM tasks
             WHERE list_uuid = ?1;",
            [list_uuid.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(ListSummary {
            total,
            remaining: total - completed,
        })
    }
}

fn parse_list_row(row: &Row<'_>) -> RepoResult<TaskList> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in task_lists.uuid"))
    })?;

    Ok(TaskList {
        uuid,
        title: row.get("title")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn load_required_list(conn: &Connection, list_uuid: TaskListId) -> RepoResult<TaskList> {
    let mut stmt = conn.prepare(&format!("{LIST_SELECT_SQL} WHERE uuid = ?1;"))?;
    let mut rows = stmt.query([list_uuid.to_string()])?;
    match rows.next()? {
        Some(row) => parse_list_row(row),
        None => Err(RepoError::ListNotFound(list_uuid)),
    }
}
