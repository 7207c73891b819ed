//! Git operations abstraction layer
//!
//! The version workflow consumes git through the [Repository] trait so that
//! the protocol logic (store, lifecycle, sync, tagging) can be exercised
//! against an in-memory double. The concrete implementations are:
//!
//! - [repository::Git2Repository]: real repositories through the `git2` crate
//! - [mock::MockRepository]: recorded operations for tests
//!
//! Both the project repository and the version-branch working copy
//! (`.semver`) are represented by the same trait.

pub mod auth;
pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use git2::{Oid, Signature};

use crate::error::Result;

/// Name and email used as author, committer and tagger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Identity {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Signature stamped with the current time
    pub fn signature(&self) -> Result<Signature<'static>> {
        Ok(Signature::now(&self.name, &self.email)?)
    }
}

/// Git capability consumed by the version workflow
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map failed
/// network or ref-update operations to [crate::error::SemverError::Operation]
/// and let other `git2` failures convert transparently.
pub trait Repository {
    /// Metadata directory shared by all worktrees of the repository
    ///
    /// For a linked worktree this is the main `.git/`, not `.git/worktrees/<name>/`.
    fn common_dir(&self) -> &Path;

    /// Root of the working tree
    fn workdir(&self) -> Result<&Path>;

    /// Name of the checked out branch
    ///
    /// A detached HEAD resolves to a local branch pointing at the same commit.
    ///
    /// # Returns
    /// * `Ok(String)` - Short branch name (e.g. "main")
    /// * `Err(SemverError::NoBranch)` - If HEAD cannot be mapped to a branch
    fn current_branch(&self) -> Result<String>;

    /// URL configured for a remote
    fn remote_url(&self, remote: &str) -> Result<String>;

    /// Whether the remote currently has `refs/heads/<branch>`
    ///
    /// Queries the remote itself. A remote-tracking ref left by an earlier
    /// fetch does not count, and a remote without any refs yields `false`.
    fn remote_has_branch(&self, remote: &str, branch: &str) -> Result<bool>;

    /// Create `branch` on the remote as a parentless history
    ///
    /// The single commit holds exactly one file, `file`, with `contents`. The
    /// working tree, the index and the checked out branch are left untouched
    /// and no local branch survives the call.
    fn publish_orphan_branch(
        &self,
        remote: &str,
        branch: &str,
        file: &str,
        contents: &str,
        message: &str,
        identity: &Identity,
    ) -> Result<Oid>;

    /// Clone only `branch` of `remote` into `path`
    ///
    /// The clone names its remote after `remote` and tracks `branch` alone.
    fn clone_branch(&self, remote: &str, branch: &str, path: &Path) -> Result<()>;

    /// Stage `paths` (relative to the working tree) and commit them on HEAD
    ///
    /// The commit's parent is the current HEAD commit, if any.
    fn commit_paths(&self, paths: &[&str], message: &str, identity: &Identity) -> Result<Oid>;

    /// Identifiers of every commit reachable from HEAD
    fn commit_ids(&self) -> Result<Vec<Oid>>;

    /// Fetch `branch` from `remote` and return the fetched tip
    fn fetch_branch(&self, remote: &str, branch: &str) -> Result<Oid>;

    /// Integrate `remote`/`branch` into the checked out branch
    ///
    /// Fast-forwards when possible, otherwise records a merge commit. A
    /// conflicting merge fails without touching HEAD.
    fn pull(&self, remote: &str, branch: &str, identity: &Identity) -> Result<()>;

    /// Push local `branch` to the same name on `remote`
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Push every local tag matching the glob `pattern` to `remote`
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Names of the tags included in the push
    fn push_tags(&self, remote: &str, pattern: &str) -> Result<Vec<String>>;

    /// Commit at HEAD
    fn head_id(&self) -> Result<Oid>;

    /// Names of the tags pointing at the HEAD commit
    fn head_tags(&self) -> Result<Vec<String>>;

    /// Create an annotated tag on HEAD, replacing an existing one only when `force` is set
    fn create_annotated_tag(
        &self,
        name: &str,
        message: &str,
        identity: &Identity,
        force: bool,
    ) -> Result<()>;
}
