pub mod json;
pub mod text;

use serde_json::Value;

use crate::error::TaskdeskError;

pub fn print_json(value: &Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

pub fn print_error(err: &TaskdeskError, json_output: bool) {
    if json_output {
        print_json(&json::error(err));
    } else {
        eprintln!("Error: {}", err.message);
    }
}

/// Turn a runner's result into the process exit code.
pub fn finish(result: Result<i32, TaskdeskError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            print_error(&e, json_output);
            1
        }
    }
}
