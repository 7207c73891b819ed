use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{BranchType, ErrorCode, Oid, Repository as Git2Repo};
use tracing::{debug, info, instrument};

use crate::error::{Result, SemverError};
use crate::git::auth::{fetch_options, push_options};
use crate::git::Identity;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Discover the repository containing `path`, searching parent directories
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Open the repository rooted exactly at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::open(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Whether a remote-tracking ref `refs/remotes/<remote>/<branch>` exists locally
    pub fn has_remote_tracking_branch(&self, remote: &str, branch: &str) -> bool {
        self.repo
            .find_reference(&format!("refs/remotes/{}/{}", remote, branch))
            .is_ok()
    }

    fn find_remote(&self, remote: &str) -> Result<git2::Remote<'_>> {
        self.repo.find_remote(remote).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                SemverError::RemoteNotFound(remote.to_string())
            } else {
                SemverError::Git(e)
            }
        })
    }

    fn push_refspecs(&self, remote_name: &str, refspecs: &[String]) -> Result<()> {
        let mut remote = self.find_remote(remote_name)?;
        let specs: Vec<&str> = refspecs.iter().map(String::as_str).collect();

        remote
            .push(&specs, Some(&mut push_options()))
            .map_err(|e| {
                SemverError::operation(format!(
                    "failed to push {} to {}: {}",
                    specs.join(" "),
                    remote_name,
                    e.message()
                ))
            })?;

        debug!(remote = remote_name, refspecs = ?specs, "pushed");
        Ok(())
    }

    /// Tree containing a single blob at a possibly nested `path`
    fn single_file_tree(&self, components: &[&str], blob: Oid) -> Result<Oid> {
        let mut builder = self.repo.treebuilder(None)?;
        match components {
            [name] => {
                builder.insert(name, blob, 0o100644)?;
            }
            [dir, rest @ ..] => {
                let subtree = self.single_file_tree(rest, blob)?;
                builder.insert(dir, subtree, 0o040000)?;
            }
            [] => return Err(SemverError::operation("empty version file path")),
        }
        Ok(builder.write()?)
    }

    fn checkout_head(&self) -> Result<()> {
        self.repo
            .checkout_head(Some(CheckoutBuilder::new().force()))?;
        Ok(())
    }
}

fn is_missing_remote_ref(e: &git2::Error) -> bool {
    e.code() == ErrorCode::NotFound || e.message().contains("couldn't find remote ref")
}

impl super::Repository for Git2Repository {
    fn common_dir(&self) -> &Path {
        self.repo.commondir()
    }

    fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| SemverError::operation("repository is bare"))
    }

    fn current_branch(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // no commits yet: HEAD still names the branch symbolically
                let head = self.repo.find_reference("HEAD")?;
                return head
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string)
                    .ok_or(SemverError::NoBranch);
            }
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            return head
                .shorthand()
                .map(str::to_string)
                .ok_or(SemverError::NoBranch);
        }

        let head_oid = head.target().ok_or(SemverError::NoBranch)?;
        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if branch.get().target() == Some(head_oid) {
                if let Some(name) = branch.name()? {
                    debug!(branch = name, "resolved detached HEAD");
                    return Ok(name.to_string());
                }
            }
        }

        Err(SemverError::NoBranch)
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        let found = self.find_remote(remote)?;
        found
            .url()
            .map(str::to_string)
            .ok_or_else(|| SemverError::operation(format!("remote '{}' has no url", remote)))
    }

    #[instrument(skip(self))]
    fn remote_has_branch(&self, remote: &str, branch: &str) -> Result<bool> {
        let mut found = self.find_remote(remote)?;
        let tracking = format!("refs/remotes/{}/{}", remote, branch);
        let refspec = format!("+refs/heads/{}:{}", branch, tracking);

        // a tracking ref left by an earlier fetch must not count as present
        if let Ok(mut stale) = self.repo.find_reference(&tracking) {
            stale.delete()?;
        }

        // an empty remote advertises no refs, so the fetch simply finds nothing
        match found.fetch(&[refspec.as_str()], Some(&mut fetch_options()), None) {
            Ok(()) => {}
            Err(e) if is_missing_remote_ref(&e) => {
                debug!("remote has no such ref");
                return Ok(false);
            }
            Err(e) => {
                return Err(SemverError::operation(format!(
                    "failed to query {}: {}",
                    remote,
                    e.message()
                )))
            }
        }

        let exists = self.repo.find_reference(&tracking).is_ok();
        debug!(exists, "queried remote branch");
        Ok(exists)
    }

    #[instrument(skip(self, contents, identity))]
    fn publish_orphan_branch(
        &self,
        remote: &str,
        branch: &str,
        file: &str,
        contents: &str,
        message: &str,
        identity: &Identity,
    ) -> Result<Oid> {
        let blob = self.repo.blob(contents.as_bytes())?;
        let components: Vec<&str> = file.split('/').filter(|c| !c.is_empty()).collect();
        let tree_oid = self.single_file_tree(&components, blob)?;
        let tree = self.repo.find_tree(tree_oid)?;

        let sig = identity.signature()?;
        let commit = self.repo.commit(None, &sig, &sig, message, &tree, &[])?;
        debug!(%commit, "created orphan commit");

        let refname = format!("refs/heads/{}", branch);
        let mut transient = self
            .repo
            .reference(&refname, commit, false, "semver: orphan branch")?;

        let pushed = self.push_refspecs(remote, &[format!("{}:{}", refname, refname)]);
        transient.delete()?;
        pushed?;

        info!(remote, branch, %commit, "published version branch");
        Ok(commit)
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    fn clone_branch(&self, remote: &str, branch: &str, path: &Path) -> Result<()> {
        let url = self.remote_url(remote)?;
        let remote_name = remote.to_string();
        let refspec = format!("+refs/heads/{}:refs/remotes/{}/{}", branch, remote, branch);

        let mut builder = RepoBuilder::new();
        builder
            .branch(branch)
            .fetch_options(fetch_options())
            .remote_create(move |repo, _name, url| {
                repo.remote_with_fetch(&remote_name, url, &refspec)
            });

        builder.clone(&url, path).map_err(|e| {
            SemverError::operation(format!(
                "failed to clone branch {} from {}: {}",
                branch,
                url,
                e.message()
            ))
        })?;

        info!(url = %url, "cloned version branch");
        Ok(())
    }

    fn commit_paths(&self, paths: &[&str], message: &str, identity: &Identity) -> Result<Oid> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(Path::new(path))?;
        }
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let sig = identity.signature()?;
        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        debug!(commit = %oid, message, "committed");
        Ok(oid)
    }

    fn commit_ids(&self) -> Result<Vec<Oid>> {
        let mut revwalk = self.repo.revwalk()?;
        match revwalk.push_head() {
            Ok(()) => {}
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Ok(Vec::new())
            }
            Err(e) => return Err(e.into()),
        }

        let mut ids = Vec::new();
        for oid in revwalk {
            ids.push(oid?);
        }
        Ok(ids)
    }

    #[instrument(skip(self))]
    fn fetch_branch(&self, remote: &str, branch: &str) -> Result<Oid> {
        let mut found = self.find_remote(remote)?;
        let tracking = format!("refs/remotes/{}/{}", remote, branch);
        let refspec = format!("+refs/heads/{}:{}", branch, tracking);

        found
            .fetch(&[refspec.as_str()], Some(&mut fetch_options()), None)
            .map_err(|e| {
                SemverError::operation(format!(
                    "failed to fetch {} from {}: {}",
                    branch,
                    remote,
                    e.message()
                ))
            })?;

        let tip = self.repo.refname_to_id(&tracking)?;
        debug!(%tip, "fetched");
        Ok(tip)
    }

    #[instrument(skip(self, identity))]
    fn pull(&self, remote: &str, branch: &str, identity: &Identity) -> Result<()> {
        let theirs_oid = self.fetch_branch(remote, branch)?;
        let theirs = self.repo.find_annotated_commit(theirs_oid)?;
        let (analysis, _) = self.repo.merge_analysis(&[&theirs])?;

        if analysis.is_up_to_date() {
            debug!("already up to date");
            return Ok(());
        }

        if analysis.is_fast_forward() {
            let mut head = self.repo.head()?;
            head.set_target(theirs_oid, &format!("pull: fast-forward {}/{}", remote, branch))?;
            self.checkout_head()?;
            info!(tip = %theirs_oid, "fast-forwarded");
            return Ok(());
        }

        let ours = self.repo.head()?.peel_to_commit()?;
        let theirs = self.repo.find_commit(theirs_oid)?;
        let mut index = self.repo.merge_commits(&ours, &theirs, None)?;
        if index.has_conflicts() {
            return Err(SemverError::operation(format!(
                "cannot integrate {}/{}: conflicting version changes",
                remote, branch
            )));
        }

        let tree = self.repo.find_tree(index.write_tree_to(&self.repo)?)?;
        let sig = identity.signature()?;
        let merge = self.repo.commit(
            Some("HEAD"),
            &sig,
            &sig,
            &format!("Merge {}/{}", remote, branch),
            &tree,
            &[&ours, &theirs],
        )?;
        self.checkout_head()?;

        info!(commit = %merge, "merged remote changes");
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let refname = format!("refs/heads/{}", branch);
        self.push_refspecs(remote, &[format!("{}:{}", refname, refname)])?;
        info!(remote, branch, "pushed branch");
        Ok(())
    }

    fn push_tags(&self, remote: &str, pattern: &str) -> Result<Vec<String>> {
        let names: Vec<String> = self
            .repo
            .tag_names(Some(pattern))?
            .iter()
            .flatten()
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            debug!(pattern, "no tags to push");
            return Ok(names);
        }

        let refspecs: Vec<String> = names
            .iter()
            .map(|tag| format!("refs/tags/{}:refs/tags/{}", tag, tag))
            .collect();
        self.push_refspecs(remote, &refspecs)?;

        info!(remote, count = names.len(), "pushed tags");
        Ok(names)
    }

    fn head_id(&self) -> Result<Oid> {
        Ok(self.repo.head()?.peel_to_commit()?.id())
    }

    fn head_tags(&self) -> Result<Vec<String>> {
        let head = self.head_id()?;
        let mut tags = Vec::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            // tags on trees or blobs cannot point at HEAD
            if let Ok(commit) = reference.peel_to_commit() {
                if commit.id() == head {
                    tags.push(name.to_string());
                }
            }
        }

        Ok(tags)
    }

    #[instrument(skip(self, identity))]
    fn create_annotated_tag(
        &self,
        name: &str,
        message: &str,
        identity: &Identity,
        force: bool,
    ) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let sig = identity.signature()?;

        self.repo
            .tag(name, head.as_object(), &sig, message, force)
            .map_err(|e| {
                if e.code() == ErrorCode::Exists {
                    SemverError::operation(format!("tag '{}' already exists", name))
                } else {
                    SemverError::Git(e)
                }
            })?;

        info!(name, "created tag");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use git2::RepositoryInitOptions;
    use std::fs;
    use tempfile::TempDir;

    fn identity() -> Identity {
        Identity::new("Test User", "test@example.com")
    }

    fn init_repo(path: &Path) -> Git2Repository {
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        Git2Repository::from_git2(Git2Repo::init_opts(path, &opts).unwrap())
    }

    fn commit_file(repo: &Git2Repository, name: &str, contents: &str) -> Oid {
        let workdir = repo.workdir().unwrap().to_path_buf();
        fs::write(workdir.join(name), contents).unwrap();
        repo.commit_paths(&[name], &format!("update {}", name), &identity())
            .unwrap()
    }

    /// Project repository with one commit on `main` pushed to a bare remote
    fn project_with_remote() -> (TempDir, Git2Repository) {
        let temp = TempDir::new().unwrap();
        Git2Repo::init_bare(temp.path().join("remote.git")).unwrap();

        let repo = init_repo(&temp.path().join("project"));
        let url = temp.path().join("remote.git");
        repo.repo.remote("origin", url.to_str().unwrap()).unwrap();
        commit_file(&repo, "README.md", "hello\n");
        repo.push_branch("origin", "main").unwrap();
        (temp, repo)
    }

    #[test]
    fn test_current_branch() {
        let temp = TempDir::new().unwrap();
        let repo = init_repo(temp.path());
        // unborn branch
        assert_eq!(repo.current_branch().unwrap(), "main");

        commit_file(&repo, "a.txt", "a");
        assert_eq!(repo.current_branch().unwrap(), "main");
    }

    #[test]
    fn test_current_branch_detached_head() {
        let temp = TempDir::new().unwrap();
        let repo = init_repo(temp.path());
        let oid = commit_file(&repo, "a.txt", "a");
        repo.repo.set_head_detached(oid).unwrap();
        assert_eq!(repo.current_branch().unwrap(), "main");

        let second = commit_file(&repo, "a.txt", "b");
        repo.repo.set_head_detached(second).unwrap();
        assert!(matches!(repo.current_branch(), Err(SemverError::NoBranch)));
    }

    #[test]
    fn test_commit_paths_chains_parents() {
        let temp = TempDir::new().unwrap();
        let repo = init_repo(temp.path());
        let first = commit_file(&repo, "a.txt", "1");
        let second = commit_file(&repo, "a.txt", "2");

        let commit = repo.repo.find_commit(second).unwrap();
        assert_eq!(commit.parent_count(), 1);
        assert_eq!(commit.parent_id(0).unwrap(), first);
        assert_eq!(repo.commit_ids().unwrap(), vec![second, first]);
    }

    #[test]
    fn test_remote_url_and_missing_remote() {
        let (temp, repo) = project_with_remote();
        let url = repo.remote_url("origin").unwrap();
        assert!(url.ends_with("remote.git"));
        assert!(matches!(
            repo.remote_url("upstream"),
            Err(SemverError::RemoteNotFound(_))
        ));
        drop(temp);
    }

    #[test]
    fn test_publish_orphan_branch() {
        let (temp, repo) = project_with_remote();
        assert!(!repo.remote_has_branch("origin", "semver").unwrap());

        let commit = repo
            .publish_orphan_branch("origin", "semver", "main", "0.0.0", "semver(main): 0.0.0", &identity())
            .unwrap();

        assert!(repo.remote_has_branch("origin", "semver").unwrap());
        // no local branch left behind and still on main
        assert!(repo.repo.find_branch("semver", BranchType::Local).is_err());
        assert_eq!(repo.current_branch().unwrap(), "main");

        let remote = Git2Repo::open_bare(temp.path().join("remote.git")).unwrap();
        let published = remote
            .find_reference("refs/heads/semver")
            .unwrap()
            .peel_to_commit()
            .unwrap();
        assert_eq!(published.id(), commit);
        assert_eq!(published.parent_count(), 0);
        let tree = published.tree().unwrap();
        assert_eq!(tree.len(), 1);
        let blob = tree.get_name("main").unwrap().to_object(&remote).unwrap();
        assert_eq!(blob.as_blob().unwrap().content(), b"0.0.0");
    }

    #[test]
    fn test_remote_has_branch_on_empty_remote() {
        let temp = TempDir::new().unwrap();
        Git2Repo::init_bare(temp.path().join("remote.git")).unwrap();
        let repo = init_repo(&temp.path().join("project"));
        let url = temp.path().join("remote.git");
        repo.repo.remote("origin", url.to_str().unwrap()).unwrap();
        commit_file(&repo, "README.md", "hello\n");

        assert!(!repo.remote_has_branch("origin", "semver").unwrap());
        assert!(!repo.remote_has_branch("origin", "main").unwrap());
    }

    #[test]
    fn test_remote_has_branch_ignores_stale_tracking_ref() {
        let (temp, repo) = project_with_remote();
        repo.publish_orphan_branch("origin", "semver", "main", "0.0.0", "semver(main): 0.0.0", &identity())
            .unwrap();
        assert!(repo.remote_has_branch("origin", "semver").unwrap());
        assert!(repo.has_remote_tracking_branch("origin", "semver"));

        let remote = Git2Repo::open_bare(temp.path().join("remote.git")).unwrap();
        remote
            .find_reference("refs/heads/semver")
            .unwrap()
            .delete()
            .unwrap();

        assert!(!repo.remote_has_branch("origin", "semver").unwrap());
        assert!(!repo.has_remote_tracking_branch("origin", "semver"));
    }

    #[test]
    fn test_common_dir_of_linked_worktree() {
        let (temp, repo) = project_with_remote();
        let worktree = repo
            .repo
            .worktree("wt", &temp.path().join("wt"), None)
            .unwrap();
        let linked = Git2Repository::open(worktree.path()).unwrap();

        assert_ne!(linked.repo.path(), repo.repo.path());
        assert_eq!(
            linked.common_dir().canonicalize().unwrap(),
            repo.common_dir().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_publish_orphan_branch_nested_file() {
        let (temp, repo) = project_with_remote();
        repo.publish_orphan_branch("origin", "semver", "feature/x", "1.0.0", "semver(feature/x): 1.0.0", &identity())
            .unwrap();

        let remote = Git2Repo::open_bare(temp.path().join("remote.git")).unwrap();
        let tree = remote
            .find_reference("refs/heads/semver")
            .unwrap()
            .peel_to_tree()
            .unwrap();
        let entry = tree.get_path(Path::new("feature/x")).unwrap();
        let blob = entry.to_object(&remote).unwrap();
        assert_eq!(blob.as_blob().unwrap().content(), b"1.0.0");
    }

    #[test]
    fn test_clone_branch_tracks_single_branch() {
        let (temp, repo) = project_with_remote();
        repo.publish_orphan_branch("origin", "semver", "main", "0.0.0", "semver(main): 0.0.0", &identity())
            .unwrap();

        let path = temp.path().join("project").join(".semver");
        repo.clone_branch("origin", "semver", &path).unwrap();

        let clone = Git2Repository::open(&path).unwrap();
        assert_eq!(clone.current_branch().unwrap(), "semver");
        assert!(clone.has_remote_tracking_branch("origin", "semver"));
        assert!(!clone.has_remote_tracking_branch("origin", "main"));
        assert_eq!(fs::read_to_string(path.join("main")).unwrap(), "0.0.0");
    }

    #[test]
    fn test_pull_fast_forward_and_merge() {
        let (temp, repo) = project_with_remote();
        repo.publish_orphan_branch("origin", "semver", "main", "0.0.0", "semver(main): 0.0.0", &identity())
            .unwrap();

        let first = Git2Repository::open({
            let p = temp.path().join("first");
            repo.clone_branch("origin", "semver", &p).unwrap();
            p
        })
        .unwrap();
        let second = Git2Repository::open({
            let p = temp.path().join("second");
            repo.clone_branch("origin", "semver", &p).unwrap();
            p
        })
        .unwrap();

        // first advances the remote; second fast-forwards
        let advanced = commit_file(&first, "main", "0.0.1");
        first.push_branch("origin", "semver").unwrap();
        second.pull("origin", "semver", &identity()).unwrap();
        assert_eq!(second.head_id().unwrap(), advanced);
        assert_eq!(
            fs::read_to_string(second.workdir().unwrap().join("main")).unwrap(),
            "0.0.1"
        );

        // diverging writes to different files merge cleanly
        commit_file(&first, "develop", "1.0.0");
        first.push_branch("origin", "semver").unwrap();
        commit_file(&second, "release", "2.0.0");
        second.pull("origin", "semver", &identity()).unwrap();
        let merge = second.repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(merge.parent_count(), 2);
        second.push_branch("origin", "semver").unwrap();
    }

    #[test]
    fn test_pull_conflict_fails() {
        let (temp, repo) = project_with_remote();
        repo.publish_orphan_branch("origin", "semver", "main", "0.0.0", "semver(main): 0.0.0", &identity())
            .unwrap();
        let first_path = temp.path().join("first");
        let second_path = temp.path().join("second");
        repo.clone_branch("origin", "semver", &first_path).unwrap();
        repo.clone_branch("origin", "semver", &second_path).unwrap();
        let first = Git2Repository::open(&first_path).unwrap();
        let second = Git2Repository::open(&second_path).unwrap();

        commit_file(&first, "main", "0.0.1");
        first.push_branch("origin", "semver").unwrap();
        let local = commit_file(&second, "main", "0.1.0");

        assert!(matches!(
            second.pull("origin", "semver", &identity()),
            Err(SemverError::Operation(_))
        ));
        assert_eq!(second.head_id().unwrap(), local);
    }

    #[test]
    fn test_push_rejected_when_behind() {
        let (temp, repo) = project_with_remote();
        repo.publish_orphan_branch("origin", "semver", "main", "0.0.0", "semver(main): 0.0.0", &identity())
            .unwrap();
        let first_path = temp.path().join("first");
        let second_path = temp.path().join("second");
        repo.clone_branch("origin", "semver", &first_path).unwrap();
        repo.clone_branch("origin", "semver", &second_path).unwrap();
        let first = Git2Repository::open(&first_path).unwrap();
        let second = Git2Repository::open(&second_path).unwrap();

        commit_file(&first, "main", "0.0.1");
        first.push_branch("origin", "semver").unwrap();
        commit_file(&second, "main", "0.0.2");
        assert!(second.push_branch("origin", "semver").is_err());
    }

    #[test]
    fn test_tags_at_head() {
        let temp = TempDir::new().unwrap();
        let repo = init_repo(temp.path());
        commit_file(&repo, "a.txt", "1");
        repo.create_annotated_tag("v0.1.0", "v0.1.0", &identity(), false)
            .unwrap();
        commit_file(&repo, "a.txt", "2");
        repo.create_annotated_tag("v0.2.0", "v0.2.0", &identity(), false)
            .unwrap();
        repo.create_annotated_tag("latest", "latest", &identity(), false)
            .unwrap();

        let mut tags = repo.head_tags().unwrap();
        tags.sort();
        assert_eq!(tags, vec!["latest".to_string(), "v0.2.0".to_string()]);
    }

    #[test]
    fn test_create_annotated_tag_force() {
        let temp = TempDir::new().unwrap();
        let repo = init_repo(temp.path());
        commit_file(&repo, "a.txt", "1");
        repo.create_annotated_tag("v1.0.0", "v1.0.0", &identity(), false)
            .unwrap();
        commit_file(&repo, "a.txt", "2");

        assert!(repo
            .create_annotated_tag("v1.0.0", "v1.0.0", &identity(), false)
            .is_err());
        repo.create_annotated_tag("v1.0.0", "v1.0.0", &identity(), true)
            .unwrap();

        let tag = repo
            .repo
            .find_reference("refs/tags/v1.0.0")
            .unwrap()
            .peel_to_tag()
            .unwrap();
        assert_eq!(tag.message(), Some("v1.0.0"));
        assert_eq!(tag.target_id(), repo.head_id().unwrap());
    }

    #[test]
    fn test_push_tags_matching_pattern() {
        let (temp, repo) = project_with_remote();
        assert!(repo.push_tags("origin", "v*").unwrap().is_empty());

        repo.create_annotated_tag("v1.0.0", "v1.0.0", &identity(), false)
            .unwrap();
        repo.create_annotated_tag("nightly", "nightly", &identity(), false)
            .unwrap();
        let pushed = repo.push_tags("origin", "v*").unwrap();
        assert_eq!(pushed, vec!["v1.0.0".to_string()]);

        let remote = Git2Repo::open_bare(temp.path().join("remote.git")).unwrap();
        assert!(remote.find_reference("refs/tags/v1.0.0").is_ok());
        assert!(remote.find_reference("refs/tags/nightly").is_err());
    }
}
