//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;

use git2::{Oid, Repository, Signature};

use aicommit::flow::{MenuAction, Notice, Prompter, TargetChoice};
use aicommit::git::GitRepo;

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// A test git repository builder for integration tests.
///
/// HEAD starts on an unborn `main` branch. Identity and signing are set in
/// the repository config so the `git` binary can commit without a global
/// config.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        repo.set_head("refs/heads/main")
            .expect("Failed to point HEAD at main");

        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        config.set_bool("commit.gpgsign", false).unwrap();

        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A `GitRepo` running the system `git` inside this repository.
    pub fn git(&self) -> GitRepo {
        GitRepo::open(self.path())
    }

    /// Get the test signature for commits.
    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write `content` to `name` in the working tree without staging it.
    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::write(self.path().join(name), content).expect("Failed to write test file");
    }

    /// Add `name` to the index.
    pub fn stage(&self, name: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Write, stage and commit a file on the current branch. Returns the commit OID.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Oid {
        self.write_file(name, content);
        self.stage(name);

        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a branch pointing to the given OID.
    pub fn branch(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).expect("Failed to find commit");
        self.repo.branch(name, &commit, false).expect("Failed to create branch");
    }

    /// Create `refs/remotes/origin/<name>` at the given OID, as a fetch would.
    pub fn remote_branch(&self, name: &str, oid: Oid) {
        self.repo
            .reference(
                &format!("refs/remotes/origin/{name}"),
                oid,
                false,
                "test remote branch",
            )
            .expect("Failed to create remote-tracking ref");
    }

    /// Point HEAD at an existing local branch and update the working tree.
    pub fn checkout(&self, name: &str) {
        let refname = format!("refs/heads/{name}");
        let target = self
            .repo
            .revparse_single(&refname)
            .expect("Failed to find branch");
        let mut opts = git2::build::CheckoutBuilder::new();
        opts.force();
        self.repo
            .checkout_tree(&target, Some(&mut opts))
            .expect("Failed to check out tree");
        self.repo.set_head(&refname).expect("Failed to move HEAD");
    }

    /// Message of the commit HEAD points to.
    pub fn head_message(&self) -> String {
        let commit = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("HEAD has no commit");
        commit.message().unwrap_or_default().to_string()
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        let Ok(head) = self.repo.head() else {
            return 0;
        };
        let mut walk = self.repo.revwalk().expect("Failed to create revwalk");
        walk.push(head.target().expect("HEAD is symbolic"))
            .expect("Failed to push HEAD");
        walk.count()
    }
}

/// Prompter answering commit confirmations and key prompts from queues.
///
/// Branch selection, reconfiguration and the menu are not expected here.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub confirms: VecDeque<bool>,
    pub keys: VecDeque<String>,
    pub notices: Vec<Notice>,
}

impl ScriptedPrompter {
    pub fn confirming(answer: bool) -> Self {
        Self {
            confirms: VecDeque::from([answer]),
            ..Self::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select_target(
        &mut self,
        branches: &[String],
        _default: usize,
    ) -> Result<TargetChoice, dialoguer::Error> {
        panic!("unexpected branch selection among {branches:?}")
    }

    fn confirm_commit(&mut self) -> Result<bool, dialoguer::Error> {
        Ok(self.confirms.pop_front().expect("unexpected commit confirmation"))
    }

    fn confirm_reconfigure(&mut self) -> Result<bool, dialoguer::Error> {
        panic!("unexpected reconfigure question")
    }

    fn api_key(&mut self) -> Result<String, dialoguer::Error> {
        Ok(self.keys.pop_front().expect("unexpected API key prompt"))
    }

    fn main_menu(&mut self) -> Result<MenuAction, dialoguer::Error> {
        panic!("unexpected main menu")
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
