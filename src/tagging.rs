use tracing::{debug, info};

use crate::config::Settings;
use crate::domain::{tag_name, version_from_tag};
use crate::error::{Result, SemverError};
use crate::git::Repository;
use crate::store;

/// Names of the tags pointing at HEAD
pub fn list_head_tags<R: Repository + ?Sized>(repo: &R) -> Result<Vec<String>> {
    repo.head_tags()
}

/// Refuse to tag a HEAD that already carries a version tag, unless `force`
///
/// Tags that do not parse as `v<semver>` are ignored.
pub fn check<R: Repository + ?Sized>(repo: &R, force: bool) -> Result<()> {
    if force {
        return Ok(());
    }

    for tag in list_head_tags(repo)? {
        debug!(tag = %tag, "checking head tag");
        if let Some(version) = version_from_tag(&tag) {
            return Err(SemverError::HeadTagged {
                commit: repo.head_id()?.to_string(),
                version: version.to_string(),
            });
        }
    }
    Ok(())
}

/// `tag`: create the annotated tag `v<version>` on HEAD
///
/// # Returns
/// * `Ok(String)` - Name of the created tag
pub fn run_tag<R: Repository + ?Sized>(repo: &R, force: bool, settings: &Settings) -> Result<String> {
    check(repo, force)?;

    let version = store::read(settings)?;
    let name = tag_name(&version);
    repo.create_annotated_tag(&name, &name, &settings.identity, force)?;

    info!(tag = %name, force, "tagged head");
    Ok(name)
}
