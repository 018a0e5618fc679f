use crate::cli::commands::ListArgs;
use crate::cli::{parse, user};
use crate::db::connection;
use crate::error::TodoqError;
use crate::output;
use crate::query::TaskFilter;
use crate::service;

pub fn run(args: ListArgs, json_output: bool, user_flag: Option<&str>) -> i32 {
    crate::cli::finish(run_inner(args, json_output, user_flag), json_output)
}

fn run_inner(args: ListArgs, json_output: bool, user_flag: Option<&str>) -> Result<i32, TodoqError> {
    let conn = connection::open_db()?;
    let owner = user::resolve_user(user_flag)?;

    let filter = TaskFilter {
        status: args.status.as_deref().map(parse::status).transpose()?,
        priority: args.priority.as_deref().map(parse::priority).transpose()?,
        due_after: args
            .due_after
            .as_deref()
            .map(|s| parse::date("due-after", s))
            .transpose()?,
        due_before: args
            .due_before
            .as_deref()
            .map(|s| parse::date("due-before", s))
            .transpose()?,
        tags: args.tags,
    };
    let tasks = service::list_tasks(&conn, &owner, &filter)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(output::json::task_list_json(
                &tasks
            )))
            .unwrap()
        );
    } else {
        output::text::print_task_table(&tasks);
    }
    Ok(0)
}
