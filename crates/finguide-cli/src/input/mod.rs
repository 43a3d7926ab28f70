pub mod file;
pub mod stdin;

use serde_json::Value;

/// Session or command input: `--input <file>` first, then piped stdin.
pub fn read_value(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => file::read_json_value(path).map(Some),
        None => stdin::read_stdin(),
    }
}
