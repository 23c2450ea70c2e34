//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for the mobile table view.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Responses are envelope structs with stable field meaning.

use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use ticklist_core::db::open_db;
use ticklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ListService, ListSort, RowEvent, Section, SqliteListRepository, SqliteTaskRepository, Task,
    TaskBoard, TaskService,
};
use uuid::Uuid;

const BOARD_DB_FILE_NAME: &str = "ticklist.sqlite3";
static BOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the lists overview screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRowItem {
    /// Stable list ID in string form.
    pub list_id: String,
    /// List title.
    pub title: String,
    /// Overview detail text: remaining count, or a checkmark when every
    /// task is done.
    pub detail: String,
}

/// One row of the two-section task table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowItem {
    /// Stable task ID in string form.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Task note (may be empty).
    pub note: String,
    /// Completion flag; decides the section the row lives in.
    pub is_complete: bool,
}

/// Generic action response envelope for board mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created/affected record ID, when the operation produced one.
    pub record_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl BoardActionResponse {
    fn success(message: impl Into<String>, record_id: String) -> Self {
        Self {
            ok: true,
            record_id: Some(record_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
        }
    }
}

/// Lists overview response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListIndexResponse {
    /// Whether the query succeeded.
    pub ok: bool,
    /// Overview rows in the requested order (empty on failure).
    pub items: Vec<ListRowItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Two-section snapshot response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshotResponse {
    /// Whether the query succeeded.
    pub ok: bool,
    /// Incomplete tasks in creation order.
    pub current: Vec<TaskRowItem>,
    /// Completed tasks in creation order.
    pub completed: Vec<TaskRowItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Section move response for completion toggles.
///
/// `to_row` is always 0: the table places toggled rows at the top of
/// their new section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardToggleResponse {
    /// Whether the toggle succeeded.
    pub ok: bool,
    /// Completion state after the toggle.
    pub is_complete: bool,
    /// Section the row left (`current|completed`).
    pub from_section: String,
    /// Row index the task occupied before the toggle.
    pub from_row: u32,
    /// Section the row entered (`current|completed`).
    pub to_section: String,
    /// Row index to insert at in the new section.
    pub to_row: u32,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl BoardToggleResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            is_complete: false,
            from_section: String::new(),
            from_row: 0,
            to_section: String::new(),
            to_row: 0,
            message: message.into(),
        }
    }
}

/// Returns all task lists for the overview screen.
///
/// `sort` accepts `title` for alphabetical order; anything else falls
/// back to creation order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_lists(sort: Option<String>) -> ListIndexResponse {
    let sort = match sort.as_deref().map(str::trim) {
        Some("title") => ListSort::Title,
        _ => ListSort::CreatedAt,
    };

    let conn = match open_board_db() {
        Ok(conn) => conn,
        Err(message) => {
            return ListIndexResponse {
                ok: false,
                items: Vec::new(),
                message,
            };
        }
    };

    let result = SqliteListRepository::try_new(&conn)
        .map(ListService::new)
        .map_err(|err| format!("board_lists failed: {err}"))
        .and_then(|service| {
            let lists = service
                .list_lists(sort)
                .map_err(|err| format!("board_lists failed: {err}"))?;
            let mut items = Vec::with_capacity(lists.len());
            for list in lists {
                let summary = service
                    .completion_summary(list.uuid)
                    .map_err(|err| format!("board_lists failed: {err}"))?;
                let detail = if summary.all_done() {
                    "\u{2713}".to_string()
                } else {
                    summary.remaining.to_string()
                };
                items.push(ListRowItem {
                    list_id: list.uuid.to_string(),
                    title: list.title,
                    detail,
                });
            }
            Ok(items)
        });

    match result {
        Ok(items) => ListIndexResponse {
            ok: true,
            items,
            message: String::new(),
        },
        Err(message) => {
            warn!("event=board_lists module=ffi status=error error={message}");
            ListIndexResponse {
                ok: false,
                items: Vec::new(),
                message,
            }
        }
    }
}

/// Creates one empty task list.
#[flutter_rust_bridge::frb(sync)]
pub fn board_create_list(title: String) -> BoardActionResponse {
    match with_list_service(|service| service.create_list(title.as_str()).map(|list| list.uuid)) {
        Ok(list_id) => BoardActionResponse::success("List created.", list_id.to_string()),
        Err(err) => BoardActionResponse::failure(format!("board_create_list failed: {err}")),
    }
}

/// Renames an existing task list.
#[flutter_rust_bridge::frb(sync)]
pub fn board_rename_list(list_id: String, title: String) -> BoardActionResponse {
    let list_uuid = match parse_id(&list_id) {
        Ok(value) => value,
        Err(message) => return BoardActionResponse::failure(message),
    };
    match with_list_service(|service| service.rename_list(list_uuid, title.as_str())) {
        Ok(()) => BoardActionResponse::success("List renamed.", list_id),
        Err(err) => BoardActionResponse::failure(format!("board_rename_list failed: {err}")),
    }
}

/// Deletes one task list and every task it owns.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_list(list_id: String) -> BoardActionResponse {
    let list_uuid = match parse_id(&list_id) {
        Ok(value) => value,
        Err(message) => return BoardActionResponse::failure(message),
    };
    match with_list_service(|service| service.delete_list(list_uuid)) {
        Ok(()) => BoardActionResponse::success("List deleted.", list_id),
        Err(err) => BoardActionResponse::failure(format!("board_delete_list failed: {err}")),
    }
}

/// Marks every task of one list complete.
#[flutter_rust_bridge::frb(sync)]
pub fn board_complete_all(list_id: String) -> BoardActionResponse {
    let list_uuid = match parse_id(&list_id) {
        Ok(value) => value,
        Err(message) => return BoardActionResponse::failure(message),
    };
    match with_list_service(|service| service.complete_all(list_uuid)) {
        Ok(flipped) => {
            BoardActionResponse::success(format!("Completed {flipped} task(s)."), list_id)
        }
        Err(err) => BoardActionResponse::failure(format!("board_complete_all failed: {err}")),
    }
}

/// Returns the two-section snapshot of one list.
#[flutter_rust_bridge::frb(sync)]
pub fn board_snapshot(list_id: String) -> BoardSnapshotResponse {
    let failure = |message: String| BoardSnapshotResponse {
        ok: false,
        current: Vec::new(),
        completed: Vec::new(),
        message,
    };

    let list_uuid = match parse_id(&list_id) {
        Ok(value) => value,
        Err(message) => return failure(message),
    };
    let conn = match open_board_db() {
        Ok(conn) => conn,
        Err(message) => return failure(message),
    };

    let repo = match SqliteTaskRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => return failure(format!("board_snapshot failed: {err}")),
    };
    match TaskBoard::open(TaskService::new(repo), list_uuid) {
        Ok(board) => BoardSnapshotResponse {
            ok: true,
            current: board.sections().current().iter().map(to_task_row).collect(),
            completed: board
                .sections()
                .completed()
                .iter()
                .map(to_task_row)
                .collect(),
            message: String::new(),
        },
        Err(err) => failure(format!("board_snapshot failed: {err}")),
    }
}

/// Appends a new incomplete task to one list.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_task(list_id: String, title: String, note: String) -> BoardActionResponse {
    let list_uuid = match parse_id(&list_id) {
        Ok(value) => value,
        Err(message) => return BoardActionResponse::failure(message),
    };
    match with_task_service(|service| {
        service
            .create_task(list_uuid, title.as_str(), note.as_str())
            .map(|task| task.uuid)
    }) {
        Ok(task_id) => BoardActionResponse::success("Task created.", task_id.to_string()),
        Err(err) => BoardActionResponse::failure(format!("board_add_task failed: {err}")),
    }
}

/// Rewrites title/note of an existing task.
#[flutter_rust_bridge::frb(sync)]
pub fn board_edit_task(task_id: String, title: String, note: String) -> BoardActionResponse {
    let task_uuid = match parse_id(&task_id) {
        Ok(value) => value,
        Err(message) => return BoardActionResponse::failure(message),
    };
    match with_task_service(|service| service.update_task(task_uuid, title.as_str(), note.as_str()))
    {
        Ok(()) => BoardActionResponse::success("Task updated.", task_id),
        Err(err) => BoardActionResponse::failure(format!("board_edit_task failed: {err}")),
    }
}

/// Permanently removes one task.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_task(task_id: String) -> BoardActionResponse {
    let task_uuid = match parse_id(&task_id) {
        Ok(value) => value,
        Err(message) => return BoardActionResponse::failure(message),
    };
    match with_task_service(|service| service.delete_task(task_uuid)) {
        Ok(()) => BoardActionResponse::success("Task deleted.", task_id),
        Err(err) => BoardActionResponse::failure(format!("board_delete_task failed: {err}")),
    }
}

/// Flips completion of one task and reports the section move.
#[flutter_rust_bridge::frb(sync)]
pub fn board_toggle_task(task_id: String) -> BoardToggleResponse {
    let task_uuid = match parse_id(&task_id) {
        Ok(value) => value,
        Err(message) => return BoardToggleResponse::failure(message),
    };
    let conn = match open_board_db() {
        Ok(conn) => conn,
        Err(message) => return BoardToggleResponse::failure(message),
    };

    let repo = match SqliteTaskRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => return BoardToggleResponse::failure(format!("board_toggle_task failed: {err}")),
    };
    let service = TaskService::new(repo);

    let task = match service.get_task(task_uuid) {
        Ok(Some(task)) => task,
        Ok(None) => return BoardToggleResponse::failure(format!("task not found: {task_uuid}")),
        Err(err) => return BoardToggleResponse::failure(format!("board_toggle_task failed: {err}")),
    };

    let mut board = match TaskBoard::open(service, task.list_uuid) {
        Ok(board) => board,
        Err(err) => return BoardToggleResponse::failure(format!("board_toggle_task failed: {err}")),
    };

    match board.toggle_task(task_uuid) {
        Ok(RowEvent::Moved { from, to }) => BoardToggleResponse {
            ok: true,
            is_complete: to.section == Section::Completed,
            from_section: section_label(from.section).to_string(),
            from_row: row_index(from.row),
            to_section: section_label(to.section).to_string(),
            to_row: row_index(to.row),
            message: String::new(),
        },
        Ok(other) => {
            BoardToggleResponse::failure(format!("unexpected row event for toggle: {other:?}"))
        }
        Err(err) => BoardToggleResponse::failure(format!("board_toggle_task failed: {err}")),
    }
}

fn to_task_row(task: &Task) -> TaskRowItem {
    TaskRowItem {
        task_id: task.uuid.to_string(),
        title: task.title.clone(),
        note: task.note.clone(),
        is_complete: task.is_complete,
    }
}

fn section_label(section: Section) -> &'static str {
    match section {
        Section::Current => "current",
        Section::Completed => "completed",
    }
}

fn row_index(row: usize) -> u32 {
    u32::try_from(row).unwrap_or(u32::MAX)
}

fn resolve_board_db_path() -> PathBuf {
    BOARD_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TICKLIST_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(BOARD_DB_FILE_NAME)
        })
        .clone()
}

fn open_board_db() -> Result<rusqlite::Connection, String> {
    let db_path = resolve_board_db_path();
    open_db(&db_path).map_err(|err| {
        warn!("event=board_db_open module=ffi status=error error={err}");
        format!("board DB open failed: {err}")
    })
}

fn with_task_service<T>(
    f: impl FnOnce(&TaskService<SqliteTaskRepository<'_>>) -> ticklist_core::RepoResult<T>,
) -> Result<T, String> {
    let conn = open_board_db()?;
    let repo = SqliteTaskRepository::try_new(&conn)
        .map_err(|err| format!("board repo init failed: {err}"))?;
    let service = TaskService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

fn with_list_service<T>(
    f: impl FnOnce(&ListService<SqliteListRepository<'_>>) -> ticklist_core::RepoResult<T>,
) -> Result<T, String> {
    let conn = open_board_db()?;
    let repo = SqliteListRepository::try_new(&conn)
        .map_err(|err| format!("board repo init failed: {err}"))?;
    let service = ListService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

fn parse_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid record id: `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::{
        board_add_task, board_complete_all, board_create_list, board_delete_task, board_lists,
        board_snapshot, board_toggle_task, core_version, init_logging, ping,
    };
    use std::time::{SystemTime, UNIX_EPOCH};
    use ticklist_core::db::open_db;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn created_task_shows_up_in_current_section() {
        let list = board_create_list(unique_token("snapshot-list"));
        assert!(list.ok, "{}", list.message);
        let list_id = list.record_id.expect("created list should return id");

        let task = board_add_task(list_id.clone(), "Buy milk".to_string(), "2%".to_string());
        assert!(task.ok, "{}", task.message);
        let task_id = task.record_id.expect("created task should return id");

        let snapshot = board_snapshot(list_id);
        assert!(snapshot.ok, "{}", snapshot.message);
        assert!(snapshot.completed.is_empty());
        let row = snapshot
            .current
            .iter()
            .find(|item| item.task_id == task_id)
            .expect("new task should be in current section");
        assert_eq!(row.title, "Buy milk");
        assert_eq!(row.note, "2%");
        assert!(!row.is_complete);
    }

    #[test]
    fn blank_task_title_is_rejected() {
        let list = board_create_list(unique_token("blank-title-list"));
        assert!(list.ok, "{}", list.message);
        let list_id = list.record_id.expect("created list should return id");

        let response = board_add_task(list_id, "   ".to_string(), String::new());
        assert!(!response.ok);
        assert!(response.message.contains("blank"));
    }

    #[test]
    fn toggle_reports_top_of_opposite_section() {
        let list = board_create_list(unique_token("toggle-list"));
        assert!(list.ok, "{}", list.message);
        let list_id = list.record_id.expect("created list should return id");

        let task = board_add_task(list_id, "toggle me".to_string(), String::new());
        assert!(task.ok, "{}", task.message);
        let task_id = task.record_id.expect("created task should return id");

        let toggled = board_toggle_task(task_id.clone());
        assert!(toggled.ok, "{}", toggled.message);
        assert!(toggled.is_complete);
        assert_eq!(toggled.from_section, "current");
        assert_eq!(toggled.to_section, "completed");
        assert_eq!(toggled.to_row, 0);

        let conn = open_db(super::resolve_board_db_path()).expect("open db");
        let is_complete: i64 = conn
            .query_row(
                "SELECT is_complete FROM tasks WHERE uuid = ?1",
                [task_id.as_str()],
                |row| row.get(0),
            )
            .expect("query task row");
        assert_eq!(is_complete, 1);
    }

    #[test]
    fn delete_twice_reports_not_found() {
        let list = board_create_list(unique_token("delete-list"));
        assert!(list.ok, "{}", list.message);
        let list_id = list.record_id.expect("created list should return id");

        let task = board_add_task(list_id, "short lived".to_string(), String::new());
        let task_id = task.record_id.expect("created task should return id");

        let first = board_delete_task(task_id.clone());
        assert!(first.ok, "{}", first.message);

        let second = board_delete_task(task_id);
        assert!(!second.ok);
        assert!(second.message.contains("not found"));
    }

    #[test]
    fn complete_all_empties_current_section() {
        let list = board_create_list(unique_token("complete-all-list"));
        let list_id = list.record_id.expect("created list should return id");

        board_add_task(list_id.clone(), "one".to_string(), String::new());
        board_add_task(list_id.clone(), "two".to_string(), String::new());

        let response = board_complete_all(list_id.clone());
        assert!(response.ok, "{}", response.message);

        let snapshot = board_snapshot(list_id);
        assert!(snapshot.ok, "{}", snapshot.message);
        assert!(snapshot.current.is_empty());
        assert_eq!(snapshot.completed.len(), 2);
    }

    #[test]
    fn lists_overview_contains_created_list_with_detail() {
        let title = unique_token("overview-list");
        let list = board_create_list(title.clone());
        let list_id = list.record_id.expect("created list should return id");

        board_add_task(list_id.clone(), "open task".to_string(), String::new());

        let overview = board_lists(None);
        assert!(overview.ok, "{}", overview.message);
        let row = overview
            .items
            .iter()
            .find(|item| item.list_id == list_id)
            .expect("created list should be in overview");
        assert_eq!(row.title, title);
        assert_eq!(row.detail, "1");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
