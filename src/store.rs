//! Version store: one file per tracked branch in the version-branch working copy

use std::fs;

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{Result, SemverError};
use crate::git::{Git2Repository, Repository};

/// Read the stored version for the tracked branch
///
/// # Returns
/// * `Ok(String)` - Trimmed file contents
/// * `Err(SemverError::BranchDoesNotExist)` - If the version file is missing
/// * `Err(SemverError::EmptyVersion)` - If the file trims to empty
pub fn read(settings: &Settings) -> Result<String> {
    let path = settings.version_file();
    if !path.is_file() {
        return Err(SemverError::BranchDoesNotExist);
    }

    debug!(path = %path.display(), "read version");
    let contents = fs::read_to_string(&path)?;
    let version = contents.trim();
    if version.is_empty() {
        return Err(SemverError::EmptyVersion(settings.branch.clone()));
    }
    Ok(version.to_string())
}

/// Write `value` as the tracked branch's version and commit it on `worktree`
///
/// Does nothing when the stored value already equals `value`. An existing
/// file with a different value is only replaced when `force` is set.
///
/// # Returns
/// * `Ok(true)` - A commit was created
/// * `Ok(false)` - Nothing changed
pub fn write<R: Repository + ?Sized>(
    worktree: &R,
    settings: &Settings,
    value: &str,
    force: bool,
) -> Result<bool> {
    let path = settings.version_file();
    debug!(value, path = %path.display(), force, "write version");

    let exists = path.exists();
    if exists {
        let current = read(settings)?;
        if current == value {
            debug!(current = %current, "version unchanged");
            return Ok(false);
        }
    }

    if exists && !force {
        debug!("version file exists, not forced");
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, value)?;

    let message = commit_message(&settings.branch, value);
    worktree.commit_paths(&[settings.branch.as_str()], &message, &settings.identity)?;

    info!(branch = %settings.branch, version = value, "stored version");
    Ok(true)
}

/// Commit message of a version change
pub fn commit_message(branch: &str, value: &str) -> String {
    format!("semver({}): {}", branch, value)
}

/// Open the version-branch working copy at `settings.path`
pub fn open_worktree(settings: &Settings) -> Result<Git2Repository> {
    if !settings.path.is_dir() {
        return Err(SemverError::BranchDoesNotExist);
    }
    Git2Repository::open(&settings.path).map_err(|e| match e {
        SemverError::Git(_) => SemverError::InvalidRepo(settings.path.clone()),
        other => other,
    })
}
