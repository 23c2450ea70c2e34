//! Core domain logic for Ticklist.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId};
pub use model::task_list::{TaskList, TaskListId};
pub use model::ValidationError;
pub use repo::list_repo::{ListRepository, ListSort, ListSummary, SqliteListRepository};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::list_service::ListService;
pub use service::task_service::TaskService;
pub use view::board::TaskBoard;
pub use view::sections::{RowEvent, RowRef, Section, SectionedTasks};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
