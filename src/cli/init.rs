use serde_json::json;

use crate::db::connection;
use crate::output;

pub fn run(json_output: bool) -> i32 {
    match connection::init_db() {
        Ok(path) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::success(json!({
                        "path": path.to_string_lossy()
                    })))
                    .unwrap()
                );
            } else {
                println!("Initialized todoq at {}", path.display());
            }
            0
        }
        Err(e) => crate::cli::finish(Err(e), json_output),
    }
}
