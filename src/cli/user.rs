use std::env;
use std::fs;

use serde_json::json;

use crate::cli::commands::UserCommands;
use crate::db::connection;
use crate::error::TodoqError;
use crate::output;

pub fn run(cmd: UserCommands, json_output: bool, user_flag: Option<&str>) -> i32 {
    crate::cli::finish(run_inner(cmd, json_output, user_flag), json_output)
}

fn run_inner(
    cmd: UserCommands,
    json_output: bool,
    user_flag: Option<&str>,
) -> Result<i32, TodoqError> {
    match cmd {
        UserCommands::Set { name } => {
            // Same init gating as every other command.
            let _ = connection::open_db()?;
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(TodoqError::validation("User name cannot be empty"));
            }
            write_default_user(&name)?;
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::success(json!({ "user": name })))
                        .unwrap()
                );
            } else {
                println!("Default user set to {name}");
            }
            Ok(0)
        }
        UserCommands::Show => {
            let user = resolve_user(user_flag)?;
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::success(json!({ "user": user })))
                        .unwrap()
                );
            } else {
                println!("{user}");
            }
            Ok(0)
        }
    }
}

/// Resolve the acting user: --user flag, then TODOQ_USER, then the
/// configured default. The result is trusted as-is; credential checks are an
/// outer layer's job.
pub fn resolve_user(flag: Option<&str>) -> Result<String, TodoqError> {
    if let Some(u) = flag {
        let u = u.trim();
        if !u.is_empty() {
            return Ok(u.to_string());
        }
    }
    if let Ok(u) = env::var("TODOQ_USER") {
        let u = u.trim().to_string();
        if !u.is_empty() {
            return Ok(u);
        }
    }
    if let Some(u) = default_user() {
        return Ok(u);
    }
    Err(TodoqError::no_user())
}

fn default_user() -> Option<String> {
    let config_path = connection::config_path().ok()?;
    let content = fs::read_to_string(config_path).ok()?;
    let config: serde_json::Value = serde_json::from_str(&content).ok()?;
    config["default_user"].as_str().map(|s| s.to_string())
}

fn write_default_user(name: &str) -> Result<(), TodoqError> {
    let config_path = connection::config_path()?;
    let config = json!({ "default_user": name });
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| TodoqError::database(e.to_string()))?;
    }
    fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap())
        .map_err(|e| TodoqError::database(e.to_string()))?;
    Ok(())
}
