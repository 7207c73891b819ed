pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod lifecycle;
pub mod logging;
pub mod store;
pub mod sync;
pub mod tagging;
pub mod ui;

pub use error::{Result, SemverError};
