use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for git-semver operations
#[derive(Error, Debug)]
pub enum SemverError {
    #[error("{0} is not valid SemVer string")]
    Parse(String),

    #[error("mismatch between current prerelease {current} and bump {prefix} - use init to set version with different prerelease")]
    PrereleaseMismatch { current: String, prefix: String },

    #[error("invalid prerelease prefix '{0}'")]
    InvalidPrefix(String),

    #[error("cannot bump {axis} of {version}: numeric component overflow")]
    Overflow { axis: String, version: String },

    #[error("the semver branch does not exist")]
    BranchDoesNotExist,

    #[error("the version file {0} in the semver branch is empty")]
    EmptyVersion(String),

    #[error("the path {} is a file", .0.display())]
    InvalidPath(PathBuf),

    #[error("the path {} is not a valid semver branch", .0.display())]
    InvalidBranch(PathBuf),

    #[error("the path {} is not a valid repo", .0.display())]
    InvalidRepo(PathBuf),

    #[error("head {commit} is already tagged with {version}")]
    HeadTagged { commit: String, version: String },

    #[error("unable to determine current branch")]
    NoBranch,

    #[error("remote '{0}' not found")]
    RemoteNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Operation(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-semver
pub type Result<T> = std::result::Result<T, SemverError>;

impl SemverError {
    /// Create a parse error for the rejected text
    pub fn parse(text: impl Into<String>) -> Self {
        SemverError::Parse(text.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemverError::Config(msg.into())
    }

    /// Create a failed-operation error with context
    pub fn operation(msg: impl Into<String>) -> Self {
        SemverError::Operation(msg.into())
    }
}
