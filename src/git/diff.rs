//! Choosing which diff to describe.

use tracing::debug;

use crate::error::GitError;

use super::runner::GitRepo;

impl GitRepo {
    /// Changes in the index (`git diff --cached`).
    pub fn staged_diff(&self) -> Result<String, GitError> {
        self.run_git(&["diff", "--cached", "--no-color"], "read staged diff")
    }

    /// Unstaged changes to tracked files (`git diff`).
    pub fn working_diff(&self) -> Result<String, GitError> {
        self.run_git(&["diff", "--no-color"], "read working tree diff")
    }

    /// Changes on HEAD since its merge base with `target` (`git diff target...HEAD`).
    ///
    /// `target` is any revision; pass a full ref for remote-tracking branches.
    pub fn branch_diff(&self, target: &str) -> Result<String, GitError> {
        let range = format!("{target}...HEAD");
        self.run_git(&["diff", "--no-color", &range, "--"], "diff against branch")
    }

    /// Diff to describe in the commit message.
    ///
    /// Selection order:
    /// 1. staged changes, if any (`target` is ignored)
    /// 2. unstaged changes, if any (`target` is ignored)
    /// 3. nothing when `target` is `None`
    /// 4. [`GitError::NoCommits`] on a repository without commits
    /// 5. [`GitError::BranchNotFound`] when `target` is not a local or `origin` branch
    /// 6. the three-dot diff between the resolved ref and HEAD
    pub fn diff(&self, target: Option<&str>) -> Result<String, GitError> {
        let staged = self.staged_diff()?;
        if !staged.trim().is_empty() {
            debug!("Using staged changes");
            return Ok(staged);
        }

        let working = self.working_diff()?;
        if !working.trim().is_empty() {
            debug!("Using unstaged changes");
            return Ok(working);
        }

        let Some(target) = target else {
            debug!("No local changes and no branch requested");
            return Ok(String::new());
        };

        // A branch cannot exist before the first commit, so this check comes
        // first to report the actionable reason on fresh repositories.
        if !self.has_commits() {
            return Err(GitError::NoCommits);
        }

        let Some(refname) = self.resolve_branch(target) else {
            return Err(GitError::BranchNotFound(target.to_string()));
        };

        debug!("Using diff against {refname}");
        self.branch_diff(&refname)
    }
}

/// Number of lines in a diff, as shown to the user.
pub fn diff_line_count(diff: &str) -> usize {
    diff.lines().count()
}
