//! Logging configuration, created once at process start
//!
//! Two `tracing-subscriber` layers:
//! - File: always debug-level, plain text, to `$HOME/git-semver.log`
//! - Console: stderr, only when `SEMVER_DEBUG` is truthy; `RUST_LOG` overrides its filter

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

pub const LOG_FILE_NAME: &str = "git-semver.log";

const DEBUG_VAR: &str = "SEMVER_DEBUG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log file, `None` disables file logging
    pub file: Option<PathBuf>,
    /// Mirror log records to stderr
    pub debug: bool,
}

impl LogConfig {
    /// Build the configuration from environment lookups
    ///
    /// # Arguments
    /// * `lookup` - Environment accessor
    /// * `home` - Directory holding the log file
    pub fn from_env<F>(lookup: F, home: Option<&Path>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        LogConfig {
            file: home.map(|home| home.join(LOG_FILE_NAME)),
            debug: lookup(DEBUG_VAR).map(|v| is_truthy(&v)).unwrap_or(false),
        }
    }

    /// Install the global subscriber
    ///
    /// The returned guard flushes the file writer on drop and must be held
    /// for the life of the process. A log file that cannot be opened only
    /// disables the file layer.
    pub fn init(&self) -> Option<WorkerGuard> {
        let (file_writer, guard) = match self.file_appender() {
            Some(appender) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (Some(writer), Some(guard))
            }
            None => (None, None),
        };

        let file_layer = file_writer.map(|writer| {
            fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_target(true)
                .with_filter(EnvFilter::new("debug"))
        });

        let console_layer = self.debug.then(|| {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter)
        });

        // a subscriber installed earlier (e.g. by a test harness) wins
        let _ = tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer)
            .try_init();

        guard
    }

    fn file_appender(&self) -> Option<RollingFileAppender> {
        let file = self.file.as_ref()?;
        let dir = file.parent()?;
        let name = file.file_name()?.to_str()?;

        RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(name)
            .build(dir)
            .ok()
    }
}

/// Whether an environment value means "enabled": true, 1, yes or on (any case)
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
