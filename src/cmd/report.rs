/*!
report.rs - rendering of dispatch outcomes.

Human output:
  stdout: each summary followed by a blank line
  stderr: error message, then the usage text for input problems

JSON output (`--json`):
  stdout: {"status":"ok","command":"movie-this","argument":"Alien","results":["..."]}
  stderr: {"status":"error","error":"...","usage":"..."}   (usage only for input problems)

Functions return strings; `print_*` are the only writers.
*/

use serde_json::json;

use super::command::USAGE;
use super::error::CommandError;

pub const INVALID_ARGUMENTS: &str = "Invalid arguments";

pub fn human_summaries(lines: &[String]) -> String {
    lines.iter().map(|l| format!("{l}\n\n")).collect()
}

pub fn json_summaries(command: &str, argument: Option<&str>, lines: &[String]) -> serde_json::Value {
    json!({
        "status": "ok",
        "command": command,
        "argument": argument,
        "results": lines,
    })
}

fn usage_wanted(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CommandError>()
        .is_some_and(CommandError::shows_usage)
}

pub fn human_error(err: &anyhow::Error) -> String {
    if usage_wanted(err) {
        format!("{err:#}\n{USAGE}")
    } else {
        format!("{err:#}")
    }
}

pub fn json_error(err: &anyhow::Error) -> serde_json::Value {
    let mut body = json!({"status": "error", "error": format!("{err:#}")});
    if usage_wanted(err)
        && let serde_json::Value::Object(ref mut map) = body
    {
        map.insert("usage".to_string(), json!(USAGE));
    }
    body
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn print_success(json: bool, command: &str, argument: Option<&str>, lines: &[String]) {
    if json {
        println!("{}", pretty(&json_summaries(command, argument, lines)));
    } else {
        print!("{}", human_summaries(lines));
    }
}

pub fn print_error(json: bool, err: &anyhow::Error) {
    if json {
        eprintln!("{}", pretty(&json_error(err)));
    } else {
        eprintln!("{}", human_error(err));
    }
}

/// Argument validation failed before any dispatch.
pub fn print_invalid_arguments(json: bool) {
    if json {
        let body = json!({"status": "error", "error": INVALID_ARGUMENTS, "usage": USAGE});
        eprintln!("{}", pretty(&body));
    } else {
        eprintln!("{INVALID_ARGUMENTS}");
        eprintln!("{USAGE}");
    }
}
