use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::TodoqError;
use crate::models::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};

const TASK_COLUMNS: &str = "id, owner_id, title, description, status, priority, \
                            due_date, tags, created_at, updated_at, completed_at";

/// Insert a new task for `owner_id`. The repository assigns the id and stamps
/// both timestamps from the same instant.
pub fn create_task(conn: &Connection, owner_id: &str, new: &NewTask) -> Result<Task, TodoqError> {
    let id = ulid::Ulid::new().to_string();
    let now = Utc::now();
    conn.execute(
        "INSERT INTO tasks (id, owner_id, title, description, status, priority,
                            due_date, tags, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id,
            owner_id,
            new.title,
            new.description,
            TaskStatus::Pending.as_str(),
            new.priority.as_str(),
            new.due_date,
            tags_to_json(&new.tags)?,
            now,
            now,
        ],
    )?;
    get_task(conn, &id, owner_id)
}

/// Fetch one task. Owner mismatch and absence are the same query outcome, so
/// both report not-found.
pub fn get_task(conn: &Connection, id: &str, owner_id: &str) -> Result<Task, TodoqError> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1 AND owner_id = ?2"),
        params![id, owner_id],
        row_to_task,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => TodoqError::task_not_found(id),
        _ => TodoqError::from(e),
    })
}

/// Resolve a task by exact id or unique id prefix, within one owner's
/// partition only.
pub fn resolve_task(conn: &Connection, owner_id: &str, reference: &str) -> Result<Task, TodoqError> {
    if let Ok(task) = get_task(conn, reference, owner_id) {
        return Ok(task);
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = ?1 AND id LIKE ?2"
    ))?;
    let prefix = format!("{reference}%");
    let mut tasks: Vec<Task> = stmt
        .query_map(params![owner_id, prefix], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;

    match tasks.len() {
        0 => Err(TodoqError::task_not_found(reference)),
        1 => Ok(tasks.remove(0)),
        _ => {
            let candidates: Vec<String> =
                tasks.iter().map(|t| format!("{} ({})", t.title, t.id)).collect();
            Err(TodoqError::ambiguous_ref(reference, &candidates))
        }
    }
}

/// All of one owner's tasks, oldest first. This is the base collection fed to
/// the query engine; the owner_id predicate is the isolation boundary.
pub fn list_tasks(conn: &Connection, owner_id: &str) -> Result<Vec<Task>, TodoqError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = ?1 ORDER BY created_at ASC"
    ))?;
    let tasks = stmt
        .query_map(params![owner_id], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

/// Read-modify-write inside an immediate transaction so concurrent updates to
/// the same task never interleave. Status changes route through the entity
/// transition, keeping completed_at coupled. Nothing is written on error.
pub fn update_task(
    conn: &Connection,
    id: &str,
    owner_id: &str,
    patch: &TaskPatch,
) -> Result<Task, TodoqError> {
    conn.execute_batch("BEGIN IMMEDIATE")?;
    let result = (|| -> Result<Task, TodoqError> {
        let mut task = get_task(conn, id, owner_id)?;
        let now = Utc::now();

        if let Some(ref title) = patch.title {
            task.title = title.clone();
        }
        if let Some(ref description) = patch.description {
            task.description = description.clone();
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(ref tags) = patch.tags {
            task.tags = tags.clone();
        }
        match patch.status {
            Some(status) => task.set_status(status, now),
            None => task.updated_at = now,
        }

        conn.execute(
            "UPDATE tasks
             SET title = ?1, description = ?2, status = ?3, priority = ?4,
                 due_date = ?5, tags = ?6, updated_at = ?7, completed_at = ?8
             WHERE id = ?9 AND owner_id = ?10",
            params![
                task.title,
                task.description,
                task.status.as_str(),
                task.priority.as_str(),
                task.due_date,
                tags_to_json(&task.tags)?,
                task.updated_at,
                task.completed_at,
                id,
                owner_id,
            ],
        )?;
        Ok(task)
    })();

    match result {
        Ok(task) => {
            conn.execute_batch("COMMIT")?;
            Ok(task)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

/// Returns whether a row was actually removed.
pub fn delete_task(conn: &Connection, id: &str, owner_id: &str) -> Result<bool, TodoqError> {
    let changed = conn.execute(
        "DELETE FROM tasks WHERE id = ?1 AND owner_id = ?2",
        params![id, owner_id],
    )?;
    Ok(changed > 0)
}

fn tags_to_json(tags: &[String]) -> Result<String, TodoqError> {
    serde_json::to_string(tags).map_err(|e| TodoqError::database(e.to_string()))
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    let tags_json: String = row.get(7)?;
    Ok(Task {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: TaskStatus::from_str(&row.get::<_, String>(4)?).unwrap_or(TaskStatus::Pending),
        priority: TaskPriority::from_str(&row.get::<_, String>(5)?)
            .unwrap_or(TaskPriority::Medium),
        due_date: row.get(6)?,
        tags: serde_json::from_str(&tags_json).unwrap_or_default(),
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
        completed_at: row.get(10)?,
    })
}
