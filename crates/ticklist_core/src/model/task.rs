//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record owned by one task list.
//! - Provide title validation shared by create/update write paths.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another task.
//! - `list_uuid` always points at the owning list; tasks have no
//!   existence outside a list.
//! - `is_complete` is the sole source of truth for section membership.
//! - `sort_order` is assigned at creation and never changed by
//!   completion toggling.

use crate::model::task_list::TaskListId;
use crate::model::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Canonical task record as persisted in the store.
///
/// This is a read model: repositories allocate `uuid` and `sort_order`
/// at insert time and return the loaded row, so callers never construct
/// partially-initialized tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID used for row targeting and stale-reference checks.
    pub uuid: TaskId,
    /// Owning list. Never null; cascade-deleted with the list.
    pub list_uuid: TaskListId,
    /// User-facing title. Non-blank after trimming.
    pub title: String,
    /// Free-form note text. May be empty.
    pub note: String,
    /// Completion flag deciding current/completed section membership.
    pub is_complete: bool,
    /// Append-order key within the owning list.
    pub sort_order: i64,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Epoch ms update timestamp.
    pub updated_at: i64,
}

/// Trims a raw task title and rejects blank input.
///
/// # Errors
/// - `ValidationError::BlankTaskTitle` when nothing remains after trim.
pub fn normalize_task_title(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankTaskTitle);
    }
    Ok(trimmed.to_string())
}
