//! Task list domain model.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another list.
//! - Deleting a list removes every owned task with it (no orphans).

use crate::model::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one task list.
pub type TaskListId = Uuid;

/// Named, ordered owner of task records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Stable global ID.
    pub uuid: TaskListId,
    /// User-facing list title. Non-blank after trimming.
    pub title: String,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Epoch ms update timestamp.
    pub updated_at: i64,
}

/// Trims a raw list title and rejects blank input.
///
/// # Errors
/// - `ValidationError::BlankListTitle` when nothing remains after trim.
pub fn normalize_list_title(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankListTitle);
    }
    Ok(trimmed.to_string())
}
