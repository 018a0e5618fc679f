use serde_json::{json, Value};

use crate::error::TodoqError;
use crate::models::Task;

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TodoqError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

/// The full wire shape of a task. Owner is implied by the authenticated
/// caller and deliberately not echoed back.
pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "status": t.status.as_str(),
        "priority": t.priority.as_str(),
        "due_date": t.due_date.map(|d| d.to_string()),
        "tags": t.tags,
        "created_at": t.created_at.to_rfc3339(),
        "updated_at": t.updated_at.to_rfc3339(),
        "completed_at": t.completed_at.map(|ts| ts.to_rfc3339()),
    })
}

pub fn task_list_json(tasks: &[Task]) -> Value {
    json!({
        "tasks": tasks.iter().map(task_json).collect::<Vec<_>>(),
        "count": tasks.len()
    })
}
