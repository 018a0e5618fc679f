use std::env;
use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;

use crate::error::TodoqError;

use super::migrations;

/// Find the .git root by walking up from the current directory. The task
/// database is project-local, like the rest of the tool's state.
pub fn find_git_root() -> Result<PathBuf, TodoqError> {
    let mut dir = env::current_dir().map_err(|e| TodoqError::database(e.to_string()))?;
    loop {
        if dir.join(".git").exists() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(TodoqError::database(
                "Not inside a git repository. todoq stores its data at <git-root>/.todoq/",
            ));
        }
    }
}

pub fn db_path() -> Result<PathBuf, TodoqError> {
    let root = find_git_root()?;
    Ok(root.join(".todoq").join("todoq.db"))
}

/// Config file holding the default user.
pub fn config_path() -> Result<PathBuf, TodoqError> {
    let root = find_git_root()?;
    Ok(root.join(".todoq").join("config.json"))
}

/// Open a connection to the database. Errors until `todoq init` has run.
pub fn open_db() -> Result<Connection, TodoqError> {
    let path = db_path()?;
    if !path.exists() {
        return Err(TodoqError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the database: create directories, database, and run migrations.
pub fn init_db() -> Result<PathBuf, TodoqError> {
    let path = db_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TodoqError::database(e.to_string()))?;
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(path)
}

fn configure_connection(conn: &Connection) -> Result<(), TodoqError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}
