//! Formatting of the single line each invocation prints.
//!
//! Stdout carries exactly one line: the current version on success, or the
//! error. Logs never go to stdout.

use console::style;

/// Line printed for a failed invocation.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Print the current version.
pub fn display_version(version: &str) {
    println!("{}", version);
}

/// Print an error line to stdout.
pub fn display_error(message: &str) {
    println!("{}", format_error(message));
}
