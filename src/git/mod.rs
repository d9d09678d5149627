//! Git operations by shelling out to the system `git` binary.
//!
//! Every call goes through an argument vector, never a shell, and inherits the
//! user's git config, hooks and credential setup.

pub mod branches;
pub mod commit;
pub mod diff;
pub mod runner;

pub use branches::parse_branch_listing;
pub use diff::diff_line_count;
pub use runner::{GitRepo, check_git_installed};

use crate::error::{CommitError, GitError};

/// The repository operations the commit flow needs.
///
/// [`GitRepo`] is the real implementation; flows take this trait so they can
/// run against a fake.
pub trait Vcs {
    /// Whether the working directory is inside a git work tree.
    fn has_repository(&self) -> bool;

    /// Whether there are uncommitted changes (tracked or untracked).
    fn has_pending_changes(&self) -> bool;

    fn current_branch(&self) -> Result<String, GitError>;

    /// Local and `origin` branches that can be compared against.
    fn list_comparable_branches(&self) -> Vec<String>;

    /// Diff to describe, see [`GitRepo::diff`] for the selection order.
    fn diff(&self, target: Option<&str>) -> Result<String, GitError>;

    /// Stage everything and commit with `message`.
    fn create_commit(&self, message: &str) -> Result<(), CommitError>;
}

impl Vcs for GitRepo {
    fn has_repository(&self) -> bool {
        GitRepo::has_repository(self)
    }

    fn has_pending_changes(&self) -> bool {
        GitRepo::has_pending_changes(self)
    }

    fn current_branch(&self) -> Result<String, GitError> {
        GitRepo::current_branch(self)
    }

    fn list_comparable_branches(&self) -> Vec<String> {
        GitRepo::list_comparable_branches(self)
    }

    fn diff(&self, target: Option<&str>) -> Result<String, GitError> {
        GitRepo::diff(self, target)
    }

    fn create_commit(&self, message: &str) -> Result<(), CommitError> {
        GitRepo::create_commit(self, message)
    }
}
