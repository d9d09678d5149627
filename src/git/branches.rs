//! Branch discovery and reference checks.

use tracing::debug;

use crate::error::GitError;

use super::runner::GitRepo;

/// Remote whose tracking branches are offered for comparison.
pub const DEFAULT_REMOTE: &str = "origin";

impl GitRepo {
    /// Name of the checked-out branch (empty on a detached HEAD).
    pub fn current_branch(&self) -> Result<String, GitError> {
        let stdout = self.run_git(&["branch", "--show-current"], "read current branch")?;
        Ok(stdout.trim().to_string())
    }

    /// Whether HEAD resolves to a commit.
    pub fn has_commits(&self) -> bool {
        self.probe(&["rev-parse", "--verify", "--quiet", "HEAD"])
    }

    /// Whether `name` is a local branch or an `origin` remote-tracking branch.
    pub fn branch_exists(&self, name: &str) -> bool {
        self.resolve_branch(name).is_some()
    }

    /// Full ref for `name`: `refs/heads/<name>`, else `refs/remotes/origin/<name>`.
    ///
    /// A bare name only resolves to a local branch in revision syntax, so
    /// callers diff against the returned ref.
    pub fn resolve_branch(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }

        [
            format!("refs/heads/{name}"),
            format!("refs/remotes/{DEFAULT_REMOTE}/{name}"),
        ]
        .into_iter()
        .find(|refname| self.probe(&["show-ref", "--verify", "--quiet", refname.as_str()]))
    }

    /// Branches that a three-dot diff can be taken against.
    ///
    /// Empty before the first commit. Every listed name is re-verified with
    /// [`GitRepo::branch_exists`], and any failure yields an empty list.
    pub fn list_comparable_branches(&self) -> Vec<String> {
        if !self.has_commits() {
            debug!("No commits yet, skipping branch listing");
            return Vec::new();
        }

        let stdout = match self.run_git(&["branch", "-a", "--no-color"], "list branches") {
            Ok(stdout) => stdout,
            Err(e) => {
                debug!("Branch listing failed: {e}");
                return Vec::new();
            }
        };

        parse_branch_listing(&stdout)
            .into_iter()
            .filter(|name| self.branch_exists(name))
            .collect()
    }
}

/// Parse `git branch -a` output into candidate branch names.
///
/// Drops the checked-out branch (`*`), symbolic refs (`origin/HEAD -> ...`),
/// detached-HEAD placeholders, and duplicates between local and `origin`
/// copies. Order of first appearance is kept.
pub fn parse_branch_listing(output: &str) -> Vec<String> {
    let remote_prefix = format!("remotes/{DEFAULT_REMOTE}/");
    let mut branches: Vec<String> = Vec::new();

    for line in output.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('*') {
            continue;
        }

        // Branches checked out in another worktree
        let line = line.strip_prefix("+ ").unwrap_or(line);

        if line.contains("->") || line.starts_with('(') {
            continue;
        }

        let name = line.strip_prefix(&remote_prefix).unwrap_or(line);
        if name == "HEAD" {
            continue;
        }

        if !branches.iter().any(|b| b == name) {
            branches.push(name.to_string());
        }
    }

    branches
}
