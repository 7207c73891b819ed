use crate::error::{Result, SemverError};
use crate::git::{Identity, Repository};
use git2::Oid;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Mock repository for testing without actual git operations
///
/// Network operations are recorded in [MockRepository::calls] instead of
/// being performed. Files are still written to `workdir` by callers, so the
/// mock is usually rooted in a temporary directory.
pub struct MockRepository {
    workdir: PathBuf,
    common_dir: PathBuf,
    branch: Option<String>,
    remotes: HashMap<String, String>,
    remote_branches: RefCell<BTreeSet<(String, String)>>,
    commits: RefCell<Vec<Oid>>,
    remote_tip: RefCell<Option<Oid>>,
    tags: RefCell<BTreeMap<String, Oid>>,
    calls: RefCell<Vec<String>>,
    next_id: Cell<u8>,
}

impl MockRepository {
    /// Create a new empty mock repository on branch `main` with remote `origin`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        let workdir = workdir.into();
        let common_dir = workdir.join(".git");
        let mut remotes = HashMap::new();
        remotes.insert("origin".to_string(), "file:///remote.git".to_string());

        MockRepository {
            workdir,
            common_dir,
            branch: Some("main".to_string()),
            remotes,
            remote_branches: RefCell::new(BTreeSet::new()),
            commits: RefCell::new(Vec::new()),
            remote_tip: RefCell::new(None),
            tags: RefCell::new(BTreeMap::new()),
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Set the checked out branch; `None` simulates an unresolvable HEAD
    pub fn with_branch(mut self, branch: Option<&str>) -> Self {
        self.branch = branch.map(str::to_string);
        self
    }

    /// Use `path` as the shared metadata directory, as for a linked worktree
    pub fn with_common_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.common_dir = path.into();
        self
    }

    /// Add a remote
    pub fn with_remote(mut self, name: &str, url: &str) -> Self {
        self.remotes.insert(name.to_string(), url.to_string());
        self
    }

    /// Mark `branch` as present on `remote`
    pub fn with_remote_branch(self, remote: &str, branch: &str) -> Self {
        self.remote_branches
            .borrow_mut()
            .insert((remote.to_string(), branch.to_string()));
        self
    }

    fn new_oid(&self) -> Oid {
        let n = self.next_id.get();
        self.next_id.set(n.wrapping_add(1));
        Oid::from_bytes(&[n; 20]).unwrap_or_else(|_| Oid::zero())
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn require_remote(&self, remote: &str) -> Result<()> {
        if self.remotes.contains_key(remote) {
            Ok(())
        } else {
            Err(SemverError::RemoteNotFound(remote.to_string()))
        }
    }

    /// Append a commit on HEAD
    pub fn add_commit(&self) -> Oid {
        let oid = self.new_oid();
        self.commits.borrow_mut().insert(0, oid);
        oid
    }

    /// Set the commit the remote version branch points at
    pub fn set_remote_tip(&self, oid: Oid) {
        *self.remote_tip.borrow_mut() = Some(oid);
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&self, name: impl Into<String>, oid: Oid) {
        self.tags.borrow_mut().insert(name.into(), oid);
    }

    /// Tag names with their targets
    pub fn tags(&self) -> BTreeMap<String, Oid> {
        self.tags.borrow().clone()
    }

    /// Recorded operations, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

fn glob_matches(pattern: &str, name: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => name == pattern,
    }
}

impl Repository for MockRepository {
    fn common_dir(&self) -> &Path {
        &self.common_dir
    }

    fn workdir(&self) -> Result<&Path> {
        Ok(&self.workdir)
    }

    fn current_branch(&self) -> Result<String> {
        self.branch.clone().ok_or(SemverError::NoBranch)
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        self.remotes
            .get(remote)
            .cloned()
            .ok_or_else(|| SemverError::RemoteNotFound(remote.to_string()))
    }

    fn remote_has_branch(&self, remote: &str, branch: &str) -> Result<bool> {
        self.require_remote(remote)?;
        Ok(self
            .remote_branches
            .borrow()
            .contains(&(remote.to_string(), branch.to_string())))
    }

    fn publish_orphan_branch(
        &self,
        remote: &str,
        branch: &str,
        file: &str,
        contents: &str,
        _message: &str,
        _identity: &Identity,
    ) -> Result<Oid> {
        self.require_remote(remote)?;
        self.record(format!(
            "publish_orphan_branch {} {} {}={}",
            remote, branch, file, contents
        ));
        self.remote_branches
            .borrow_mut()
            .insert((remote.to_string(), branch.to_string()));
        let oid = self.new_oid();
        self.set_remote_tip(oid);
        Ok(oid)
    }

    fn clone_branch(&self, remote: &str, branch: &str, path: &Path) -> Result<()> {
        self.require_remote(remote)?;
        if !self
            .remote_branches
            .borrow()
            .contains(&(remote.to_string(), branch.to_string()))
        {
            return Err(SemverError::operation(format!(
                "remote branch {} not found in {}",
                branch, remote
            )));
        }
        fs::create_dir_all(path)?;
        self.record(format!("clone_branch {} {}", remote, branch));
        Ok(())
    }

    fn commit_paths(&self, paths: &[&str], message: &str, _identity: &Identity) -> Result<Oid> {
        self.record(format!("commit [{}] {}", paths.join(","), message));
        Ok(self.add_commit())
    }

    fn commit_ids(&self) -> Result<Vec<Oid>> {
        Ok(self.commits.borrow().clone())
    }

    fn fetch_branch(&self, remote: &str, branch: &str) -> Result<Oid> {
        self.require_remote(remote)?;
        self.record(format!("fetch_branch {} {}", remote, branch));
        self.remote_tip
            .borrow()
            .ok_or_else(|| SemverError::operation(format!("couldn't find remote ref {}", branch)))
    }

    fn pull(&self, remote: &str, branch: &str, _identity: &Identity) -> Result<()> {
        let tip = self.fetch_branch(remote, branch)?;
        self.record(format!("pull {} {}", remote, branch));
        let mut commits = self.commits.borrow_mut();
        if !commits.contains(&tip) {
            commits.insert(0, tip);
        }
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.require_remote(remote)?;
        self.record(format!("push_branch {} {}", remote, branch));
        let head = self.commits.borrow().first().copied();
        *self.remote_tip.borrow_mut() = head;
        self.remote_branches
            .borrow_mut()
            .insert((remote.to_string(), branch.to_string()));
        Ok(())
    }

    fn push_tags(&self, remote: &str, pattern: &str) -> Result<Vec<String>> {
        self.require_remote(remote)?;
        let names: Vec<String> = self
            .tags
            .borrow()
            .keys()
            .filter(|name| glob_matches(pattern, name))
            .cloned()
            .collect();
        if !names.is_empty() {
            self.record(format!("push_tags {} {}", remote, names.join(",")));
        }
        Ok(names)
    }

    fn head_id(&self) -> Result<Oid> {
        self.commits
            .borrow()
            .first()
            .copied()
            .ok_or_else(|| SemverError::operation("reference 'HEAD' has no commits"))
    }

    fn head_tags(&self) -> Result<Vec<String>> {
        let head = self.head_id()?;
        Ok(self
            .tags
            .borrow()
            .iter()
            .filter(|(_, oid)| **oid == head)
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn create_annotated_tag(
        &self,
        name: &str,
        message: &str,
        _identity: &Identity,
        force: bool,
    ) -> Result<()> {
        let head = self.head_id()?;
        if !force && self.tags.borrow().contains_key(name) {
            return Err(SemverError::operation(format!("tag '{}' already exists", name)));
        }
        self.record(format!("tag {} {} force={}", name, message, force));
        self.add_tag(name, head);
        Ok(())
    }
}
