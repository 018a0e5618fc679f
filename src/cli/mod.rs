pub mod commands;
pub mod init;
pub mod list;
pub mod parse;
pub mod task;
pub mod user;

pub use commands::*;

use crate::error::TodoqError;
use crate::output;

/// Shared tail for command handlers: report the error in the requested mode
/// and map the outcome to an exit code.
pub(crate) fn finish(result: Result<i32, TodoqError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::error(&e)).unwrap()
                );
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}
