//! User interface module - output of the command result.

pub mod formatter;

pub use formatter::{display_error, display_version, format_error};
