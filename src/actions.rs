//! GitHub Actions workflow commands.
//!
//! The runner scans stdout for `::command::` lines. Groups fold a
//! step's output in the job log, warnings and errors become
//! annotations, and masked values are redacted from every later
//! log line.

use crate::error::DeployResult;

/// Run `f` inside a collapsible log group titled `title`.
///
/// The group is closed whether `f` succeeds or fails.
pub fn group<T>(title: &str, f: impl FnOnce() -> DeployResult<T>) -> DeployResult<T> {
    println!("::group::{}", escape_data(title));
    let result = f();
    println!("::endgroup::");
    result
}

pub fn warning(message: &str) {
    println!("::warning::{}", escape_data(message));
}

pub fn error(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// Redact `secret` from the rest of the job log.
pub fn mask(secret: &str) {
    for line in secret.lines().map(str::trim).filter(|l| !l.is_empty()) {
        println!("::add-mask::{}", escape_data(line));
    }
}

/// Escape a workflow command message so newlines and `%` survive.
#[must_use]
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
