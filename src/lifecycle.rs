//! Creation and local cloning of the version branch

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::config::{Settings, SEMVER_BRANCH, WORKTREE_DIR};
use crate::domain;
use crate::error::{Result, SemverError};
use crate::git::{Git2Repository, Repository};
use crate::store;

/// Make sure the remote carries the version branch
///
/// Validates `version`, then publishes a parentless `semver` branch holding
/// only the tracked branch's version file when the remote has none yet. The
/// working copy directory is excluded from the project in either case.
#[instrument(skip(repo, settings), fields(remote = %settings.remote))]
pub fn initialize<R: Repository + ?Sized>(repo: &R, version: &str, settings: &Settings) -> Result<()> {
    let version = domain::parse(version)?.to_string();

    if repo.remote_has_branch(&settings.remote, SEMVER_BRANCH)? {
        debug!("remote already has the version branch");
    } else {
        repo.publish_orphan_branch(
            &settings.remote,
            SEMVER_BRANCH,
            &settings.branch,
            &version,
            &store::commit_message(&settings.branch, &version),
            &settings.identity,
        )?;
        info!(version = %version, "created version branch");
    }

    append_ignore_rule(repo.common_dir(), WORKTREE_DIR)?;
    Ok(())
}

/// Remove a previous working copy so it can be cloned anew
///
/// Only a repository whose `remote` tracks the version branch is removed.
///
/// # Returns
/// * `Err(SemverError::InvalidPath)` - `path` is a regular file
/// * `Err(SemverError::InvalidRepo)` - `path` is a directory but not a repository
/// * `Err(SemverError::InvalidBranch)` - `path` is a repository without the version branch
pub fn remove_stale(path: &Path, remote: &str) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if path.is_file() {
        return Err(SemverError::InvalidPath(path.to_path_buf()));
    }

    let existing = Git2Repository::open(path)
        .map_err(|_| SemverError::InvalidRepo(path.to_path_buf()))?;
    if !existing.has_remote_tracking_branch(remote, SEMVER_BRANCH) {
        return Err(SemverError::InvalidBranch(path.to_path_buf()));
    }
    drop(existing);

    debug!(path = %path.display(), "removing stale working copy");
    fs::remove_dir_all(path)?;
    Ok(())
}

/// Clone the version branch of `remote` into `local_path`
///
/// A stale working copy at `local_path` is removed first (see [remove_stale]).
#[instrument(skip(repo, local_path), fields(path = %local_path.display()))]
pub fn clone<R: Repository + ?Sized>(repo: &R, local_path: &Path, remote: &str) -> Result<()> {
    remove_stale(local_path, remote)?;
    repo.clone_branch(remote, SEMVER_BRANCH, local_path)?;
    append_ignore_rule(repo.common_dir(), WORKTREE_DIR)?;
    Ok(())
}

/// `init`: set up the working copy and store `version`
///
/// The version is only replaced when one is already stored if `force` is set.
pub fn run_init<R: Repository + ?Sized>(
    repo: &R,
    version: &str,
    force: bool,
    settings: &Settings,
) -> Result<()> {
    debug!(version, force, "init");
    let version = domain::parse(version)?.to_string();

    remove_stale(&settings.path, &settings.remote)?;
    initialize(repo, &version, settings)?;
    clone(repo, &settings.path, &settings.remote)?;

    let worktree = store::open_worktree(settings)?;
    store::write(&worktree, settings, &version, force)?;
    Ok(())
}

/// Append `entry` to `<common_dir>/info/exclude` unless a line already matches
///
/// # Returns
/// * `Ok(true)` - The rule was added
/// * `Ok(false)` - The rule was already present
pub fn append_ignore_rule(common_dir: &Path, entry: &str) -> Result<bool> {
    let info = common_dir.join("info");
    fs::create_dir_all(&info)?;
    let exclude = info.join("exclude");

    let existing = match fs::read_to_string(&exclude) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    if existing.lines().any(|line| line.trim() == entry) {
        return Ok(false);
    }

    let mut file = OpenOptions::new().create(true).append(true).open(&exclude)?;
    write!(file, "\n{}\n", entry)?;
    debug!(entry, path = %exclude.display(), "added ignore rule");
    Ok(true)
}
