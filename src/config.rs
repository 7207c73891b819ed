use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SemverError};
use crate::git::{Identity, Repository};

/// Name of the version branch on the remote
pub const SEMVER_BRANCH: &str = "semver";

/// Directory of the version-branch working copy, relative to the project root
pub const WORKTREE_DIR: &str = ".semver";

pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_USER_NAME: &str = "semver";
pub const DEFAULT_USER_EMAIL: &str = "semver@semver.org";
pub const DEFAULT_PRE_PREFIX: &str = "pre";

const BRANCH_VARS: &[&str] = &["SEMVER_BRANCH", "GIT_BRANCH", "BRANCH_NAME"];
const REMOTE_VARS: &[&str] = &["SEMVER_REMOTE_NAME"];
const USER_NAME_VARS: &[&str] = &["SEMVER_USER_NAME", "GIT_AUTHOR_NAME", "GIT_COMMITTER_NAME"];
const USER_EMAIL_VARS: &[&str] = &["SEMVER_USER_EMAIL", "GIT_AUTHOR_EMAIL", "GIT_COMMITTER_EMAIL"];
const PRE_PREFIX_VARS: &[&str] = &["SEMVER_PRE_PREFIX"];

/// Optional settings read from `gitsemver.toml`.
///
/// Every field can be omitted; environment variables take precedence over
/// anything set here.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub remote: Option<String>,

    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub user_email: Option<String>,

    #[serde(default)]
    pub pre_prefix: Option<String>,
}

/// Settings for one invocation, resolved once and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Tracked branch name, also the name of its version file
    pub branch: String,
    pub remote: String,
    pub identity: Identity,
    /// Local path of the version-branch working copy
    pub path: PathBuf,
    /// Default prefix for `bump pre`
    pub pre_prefix: String,
}

impl Settings {
    /// Resolve settings for the project repository `repo`.
    ///
    /// Each field is taken from the first source that provides it:
    /// environment (through `lookup`), `file`, the repository, then the
    /// hardcoded default. The repository is only asked for its active branch
    /// when no branch override is set.
    ///
    /// # Arguments
    /// * `lookup` - Environment accessor; empty values count as unset
    /// * `file` - Parsed configuration file (or defaults)
    /// * `repo` - Project repository
    pub fn resolve<F, R>(lookup: F, file: &FileConfig, repo: &R) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
        R: Repository + ?Sized,
    {
        let first = |vars: &[&str]| {
            vars.iter()
                .find_map(|var| lookup(*var).filter(|value| !value.is_empty()))
        };

        let branch = match first(BRANCH_VARS) {
            Some(branch) => branch,
            None => repo.current_branch()?,
        };

        let remote = first(REMOTE_VARS)
            .or_else(|| file.remote.clone())
            .unwrap_or_else(|| DEFAULT_REMOTE.to_string());

        let name = first(USER_NAME_VARS)
            .or_else(|| file.user_name.clone())
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());
        let email = first(USER_EMAIL_VARS)
            .or_else(|| file.user_email.clone())
            .unwrap_or_else(|| DEFAULT_USER_EMAIL.to_string());

        let pre_prefix = first(PRE_PREFIX_VARS)
            .or_else(|| file.pre_prefix.clone())
            .unwrap_or_else(|| DEFAULT_PRE_PREFIX.to_string());

        let path = repo.workdir()?.join(WORKTREE_DIR);

        Ok(Settings {
            branch,
            remote,
            identity: Identity::new(name, email),
            path,
            pre_prefix,
        })
    }

    /// Path of the version file for the tracked branch
    pub fn version_file(&self) -> PathBuf {
        self.path.join(&self.branch)
    }
}

/// Process environment lookup, treating empty values as unset
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Loads the configuration file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitsemver.toml` in the project working directory
/// 3. `.gitsemver.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to a custom configuration file
/// * `workdir` - Project working directory
///
/// # Returns
/// * `Ok(FileConfig)` - Loaded or default configuration
/// * `Err(SemverError::Config)` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, workdir: &Path) -> Result<FileConfig> {
    let candidate = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = workdir.join("gitsemver.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs::config_dir()
                    .map(|dir| dir.join(".gitsemver.toml"))
                    .filter(|path| path.exists())
            }
        }
    };

    let Some(path) = candidate else {
        return Ok(FileConfig::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        SemverError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    toml::from_str(&config_str)
        .map_err(|e| SemverError::config(format!("invalid {}: {}", path.display(), e)))
}
