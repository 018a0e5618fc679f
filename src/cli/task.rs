use serde_json::json;

use crate::cli::commands::{AddArgs, EditArgs};
use crate::cli::{parse, user};
use crate::db::{connection, task_repo};
use crate::error::TodoqError;
use crate::events::NullNotifier;
use crate::models::{NewTask, TaskPatch};
use crate::output;
use crate::service;

pub fn run_add(args: AddArgs, json_output: bool, user_flag: Option<&str>) -> i32 {
    crate::cli::finish(run_add_inner(args, json_output, user_flag), json_output)
}

fn run_add_inner(
    args: AddArgs,
    json_output: bool,
    user_flag: Option<&str>,
) -> Result<i32, TodoqError> {
    let conn = connection::open_db()?;
    let owner = user::resolve_user(user_flag)?;

    let input = NewTask {
        title: args.title,
        description: args.desc,
        priority: parse::priority(&args.priority)?,
        due_date: args
            .due
            .as_deref()
            .map(|s| parse::date("due date", s))
            .transpose()?,
        tags: args.tags,
    };
    let task = service::create_task(&conn, &owner, input, &NullNotifier)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&task)
            })))
            .unwrap()
        );
    } else {
        println!("Added task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

pub fn run_show(id: &str, json_output: bool, user_flag: Option<&str>) -> i32 {
    crate::cli::finish(run_show_inner(id, json_output, user_flag), json_output)
}

fn run_show_inner(id: &str, json_output: bool, user_flag: Option<&str>) -> Result<i32, TodoqError> {
    let conn = connection::open_db()?;
    let owner = user::resolve_user(user_flag)?;
    let task = task_repo::resolve_task(&conn, &owner, id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&task)
            })))
            .unwrap()
        );
    } else {
        output::text::print_task(&task);
    }
    Ok(0)
}

pub fn run_edit(args: EditArgs, json_output: bool, user_flag: Option<&str>) -> i32 {
    crate::cli::finish(run_edit_inner(args, json_output, user_flag), json_output)
}

fn run_edit_inner(
    args: EditArgs,
    json_output: bool,
    user_flag: Option<&str>,
) -> Result<i32, TodoqError> {
    let conn = connection::open_db()?;
    let owner = user::resolve_user(user_flag)?;
    let task = task_repo::resolve_task(&conn, &owner, &args.id)?;

    let patch = TaskPatch {
        title: args.title,
        // a blank --desc collapses to "cleared" in the service layer
        description: args.desc.map(Some),
        status: args.status.as_deref().map(parse::status).transpose()?,
        priority: args.priority.as_deref().map(parse::priority).transpose()?,
        due_date: if args.clear_due {
            Some(None)
        } else {
            args.due
                .as_deref()
                .map(|s| parse::date("due date", s).map(Some))
                .transpose()?
        },
        tags: if args.clear_tags {
            Some(Vec::new())
        } else if args.tags.is_empty() {
            None
        } else {
            Some(args.tags)
        },
    };
    let updated = service::update_task(&conn, &task.id, &owner, patch, &NullNotifier)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&updated)
            })))
            .unwrap()
        );
    } else {
        println!("Updated task {}", updated.id);
    }
    Ok(0)
}

pub fn run_done(id: &str, json_output: bool, user_flag: Option<&str>) -> i32 {
    crate::cli::finish(run_status_inner(id, true, json_output, user_flag), json_output)
}

pub fn run_undo(id: &str, json_output: bool, user_flag: Option<&str>) -> i32 {
    crate::cli::finish(run_status_inner(id, false, json_output, user_flag), json_output)
}

fn run_status_inner(
    id: &str,
    done: bool,
    json_output: bool,
    user_flag: Option<&str>,
) -> Result<i32, TodoqError> {
    let conn = connection::open_db()?;
    let owner = user::resolve_user(user_flag)?;
    let task = task_repo::resolve_task(&conn, &owner, id)?;

    let updated = if done {
        service::mark_done(&conn, &task.id, &owner, &NullNotifier)?
    } else {
        service::mark_pending(&conn, &task.id, &owner, &NullNotifier)?
    };

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&updated)
            })))
            .unwrap()
        );
    } else {
        println!("Task {} → {}", updated.id, updated.status.as_str());
    }
    Ok(0)
}

pub fn run_delete(id: &str, json_output: bool, user_flag: Option<&str>) -> i32 {
    crate::cli::finish(run_delete_inner(id, json_output, user_flag), json_output)
}

fn run_delete_inner(
    id: &str,
    json_output: bool,
    user_flag: Option<&str>,
) -> Result<i32, TodoqError> {
    let conn = connection::open_db()?;
    let owner = user::resolve_user(user_flag)?;
    let task = task_repo::resolve_task(&conn, &owner, id)?;
    service::delete_task(&conn, &task.id, &owner, &NullNotifier)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "deleted": { "id": task.id }
            })))
            .unwrap()
        );
    } else {
        println!("Deleted task {}", task.id);
    }
    Ok(0)
}
