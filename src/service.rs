//! The orchestration layer: validation and normalization on the way in,
//! repository access, the query engine on the way out, and mutation events
//! after commit. The CLI never touches the repository directly.
//!
//! Every function takes the verified `owner_id` explicitly; there is no
//! ambient current-user state.

use rusqlite::Connection;

use crate::db::task_repo;
use crate::error::TodoqError;
use crate::events::{Notifier, TaskEvent};
use crate::models::{NewTask, Task, TaskPatch, TaskStatus};
use crate::query::{self, TaskFilter};

pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 1000;

pub fn create_task(
    conn: &Connection,
    owner_id: &str,
    input: NewTask,
    notifier: &dyn Notifier,
) -> Result<Task, TodoqError> {
    let new = NewTask {
        title: validate_title(&input.title)?,
        description: validate_description(input.description)?,
        priority: input.priority,
        due_date: input.due_date,
        tags: normalize_tags(input.tags),
    };
    let task = task_repo::create_task(conn, owner_id, &new)?;
    notifier.notify(&TaskEvent::Created { task: task.clone() });
    Ok(task)
}

pub fn get_task(conn: &Connection, id: &str, owner_id: &str) -> Result<Task, TodoqError> {
    task_repo::get_task(conn, id, owner_id)
}

pub fn list_tasks(
    conn: &Connection,
    owner_id: &str,
    filter: &TaskFilter,
) -> Result<Vec<Task>, TodoqError> {
    let tasks = task_repo::list_tasks(conn, owner_id)?;
    Ok(query::apply(tasks, filter))
}

pub fn update_task(
    conn: &Connection,
    id: &str,
    owner_id: &str,
    mut patch: TaskPatch,
    notifier: &dyn Notifier,
) -> Result<Task, TodoqError> {
    if patch.is_empty() {
        return Err(TodoqError::validation("No fields to update"));
    }
    if let Some(title) = patch.title.take() {
        patch.title = Some(validate_title(&title)?);
    }
    if let Some(description) = patch.description.take() {
        patch.description = Some(validate_description(description)?);
    }
    if let Some(tags) = patch.tags.take() {
        patch.tags = Some(normalize_tags(tags));
    }
    let task = task_repo::update_task(conn, id, owner_id, &patch)?;
    notifier.notify(&TaskEvent::Updated { task: task.clone() });
    Ok(task)
}

pub fn delete_task(
    conn: &Connection,
    id: &str,
    owner_id: &str,
    notifier: &dyn Notifier,
) -> Result<(), TodoqError> {
    if !task_repo::delete_task(conn, id, owner_id)? {
        return Err(TodoqError::task_not_found(id));
    }
    notifier.notify(&TaskEvent::Deleted {
        id: id.to_string(),
        owner_id: owner_id.to_string(),
    });
    Ok(())
}

pub fn mark_done(
    conn: &Connection,
    id: &str,
    owner_id: &str,
    notifier: &dyn Notifier,
) -> Result<Task, TodoqError> {
    update_task(conn, id, owner_id, TaskPatch::status_only(TaskStatus::Done), notifier)
}

pub fn mark_pending(
    conn: &Connection,
    id: &str,
    owner_id: &str,
    notifier: &dyn Notifier,
) -> Result<Task, TodoqError> {
    update_task(conn, id, owner_id, TaskPatch::status_only(TaskStatus::Pending), notifier)
}

fn validate_title(title: &str) -> Result<String, TodoqError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TodoqError::validation("Task title cannot be empty"));
    }
    if trimmed.chars().count() > TITLE_MAX {
        return Err(TodoqError::validation(format!(
            "Task title cannot exceed {TITLE_MAX} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Whitespace-only descriptions collapse to none.
fn validate_description(description: Option<String>) -> Result<Option<String>, TodoqError> {
    let Some(description) = description else {
        return Ok(None);
    };
    if description.trim().is_empty() {
        return Ok(None);
    }
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(TodoqError::validation(format!(
            "Task description cannot exceed {DESCRIPTION_MAX} characters"
        )));
    }
    Ok(Some(description))
}

/// Trim, drop empties, collapse duplicates; first occurrence wins, so
/// insertion order is preserved for display.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !out.iter().any(|t| t == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}
