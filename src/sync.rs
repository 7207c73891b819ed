use tracing::{debug, info, instrument};

use crate::config::{Settings, SEMVER_BRANCH};
use crate::domain::TAG_GLOB;
use crate::error::Result;
use crate::git::Repository;

/// Publish the version branch and the project's version tags
///
/// The remote version branch is integrated first when its tip is unknown
/// locally, so a concurrent writer's commits are not rejected as a
/// non-fast-forward. Nothing is retried: a rejected push fails the call and
/// leaves local commits in place.
///
/// # Arguments
/// * `project` - Project repository, source of the `v*` tags
/// * `worktree` - Version-branch working copy
#[instrument(skip_all, fields(remote = %settings.remote))]
pub fn push<P, W>(project: &P, worktree: &W, settings: &Settings) -> Result<()>
where
    P: Repository + ?Sized,
    W: Repository + ?Sized,
{
    let local = worktree.commit_ids()?;
    let remote_tip = worktree.fetch_branch(&settings.remote, SEMVER_BRANCH)?;

    if local.contains(&remote_tip) {
        debug!(%remote_tip, "remote tip known locally");
    } else {
        debug!(%remote_tip, "integrating remote version branch");
        worktree.pull(&settings.remote, SEMVER_BRANCH, &settings.identity)?;
    }

    worktree.push_branch(&settings.remote, SEMVER_BRANCH)?;

    let tags = project.push_tags(&settings.remote, TAG_GLOB)?;
    info!(tags = tags.len(), "pushed version branch");
    Ok(())
}
