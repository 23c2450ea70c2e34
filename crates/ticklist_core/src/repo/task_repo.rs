//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD + completion-toggle APIs over `tasks` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate titles before SQL mutations.
//! - Every mutation is a single atomic statement; no partial state is
//!   visible to readers.
//! - `sort_order` is allocated append-only per list and never rewritten
//!   by completion toggling.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::{normalize_task_title, Task, TaskId};
use crate::model::task_list::TaskListId;
use crate::model::ValidationError;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    list_uuid,
    title,
    note,
    is_complete,
    sort_order,
    created_at,
    updated_at
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for task-list persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Input rejected before persistence; store state unchanged.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap failure.
    Db(DbError),
    /// Target task no longer exists (stale reference).
    NotFound(TaskId),
    /// Target list no longer exists.
    ListNotFound(TaskListId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::ListNotFound(id) => write!(f, "task list not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task CRUD and completion toggling.
pub trait TaskRepository {
    /// Appends one incomplete task to the given list and returns the
    /// persisted row.
    fn create_task(&self, list_uuid: TaskListId, title: &str, note: &str) -> RepoResult<Task>;
    /// Rewrites title/note of an existing task. Never touches
    /// `is_complete`.
    fn update_task(&self, task_uuid: TaskId, title: &str, note: &str) -> RepoResult<()>;
    /// Permanently removes one task. A second delete of the same id
    /// fails with `NotFound`.
    fn delete_task(&self, task_uuid: TaskId) -> RepoResult<()>;
    /// Flips `is_complete` and returns the updated row. The only
    /// operation that changes section membership.
    fn toggle_complete(&self, task_uuid: TaskId) -> RepoResult<Task>;
    /// Loads one task by id.
    fn get_task(&self, task_uuid: TaskId) -> RepoResult<Option<Task>>;
    /// Lists all tasks of one list in creation order.
    fn list_tasks(&self, list_uuid: TaskListId) -> RepoResult<Vec<Task>>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_store_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, list_uuid: TaskListId, title: &str, note: &str) -> RepoResult<Task> {
        let title = normalize_task_title(title)?;
        if !list_exists(self.conn, list_uuid)? {
            return Err(RepoError::ListNotFound(list_uuid));
        }

        let task_uuid = Uuid::new_v4();
        let sort_order = next_sort_order(self.conn, list_uuid)?;
        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                list_uuid,
                title,
                note,
                is_complete,
                sort_order
            ) VALUES (?1, ?2, ?3, ?4, 0, ?5);",
            params![
                task_uuid.to_string(),
                list_uuid.to_string(),
                title.as_str(),
                note,
                sort_order,
            ],
        )?;

        load_required_task(self.conn, task_uuid)
    }

    fn update_task(&self, task_uuid: TaskId, title: &str, note: &str) -> RepoResult<()> {
        let title = normalize_task_title(title)?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?2,
                note = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![task_uuid.to_string(), title.as_str(), note],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task_uuid));
        }

        Ok(())
    }

    fn delete_task(&self, task_uuid: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [task_uuid.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(task_uuid));
        }

        Ok(())
    }

    fn toggle_complete(&self, task_uuid: TaskId) -> RepoResult<Task> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                is_complete = 1 - is_complete,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [task_uuid.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task_uuid));
        }

        load_required_task(self.conn, task_uuid)
    }

    fn get_task(&self, task_uuid: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([task_uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, list_uuid: TaskListId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE list_uuid = ?1
             ORDER BY sort_order ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([list_uuid.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid = parse_uuid_column(row, "uuid", "tasks.uuid")?;
    let list_uuid = parse_uuid_column(row, "list_uuid", "tasks.list_uuid")?;

    let is_complete = match row.get::<_, i64>("is_complete")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_complete value `{other}` in tasks.is_complete"
            )));
        }
    };

    Ok(Task {
        uuid,
        list_uuid,
        title: row.get("title")?,
        note: row.get("note")?,
        is_complete,
        sort_order: row.get("sort_order")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn parse_uuid_column(row: &Row<'_>, column: &str, qualified: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in {qualified}")))
}

fn load_required_task(conn: &Connection, task_uuid: TaskId) -> RepoResult<Task> {
    let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;
    let mut rows = stmt.query([task_uuid.to_string()])?;
    match rows.next()? {
        Some(row) => parse_task_row(row),
        None => Err(RepoError::NotFound(task_uuid)),
    }
}

pub(crate) fn list_exists(conn: &Connection, list_uuid: TaskListId) -> RepoResult<bool> {
    let exists: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM task_lists WHERE uuid = ?1;",
            [list_uuid.to_string()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(exists.is_some())
}

fn next_sort_order(conn: &Connection, list_uuid: TaskListId) -> RepoResult<i64> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(sort_order), -1) + 1
         FROM tasks
         WHERE list_uuid = ?1;",
        [list_uuid.to_string()],
        |row| row.get(0),
    )?;
    Ok(next)
}

pub(crate) fn ensure_store_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for (table, columns) in [
        (
            "task_lists",
            ["uuid", "title", "created_at", "updated_at"].as_slice(),
        ),
        (
            "tasks",
            [
                "uuid",
                "list_uuid",
                "title",
                "note",
                "is_complete",
                "sort_order",
                "created_at",
                "updated_at",
            ]
            .as_slice(),
        ),
    ] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
