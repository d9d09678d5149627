//! Spawning `git` in a fixed working directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::GitError;

/// Fail early when no `git` executable is on `PATH`.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git")
        .map(|path| debug!("Using git at {}", path.display()))
        .map_err(|_| GitError::NotInstalled)
}

/// A git working copy addressed by directory.
#[derive(Debug, Clone)]
pub struct GitRepo {
    workdir: PathBuf,
}

impl GitRepo {
    /// Bind to `workdir`. Nothing is checked until the first call.
    pub fn open(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Whether the directory is inside a git work tree.
    pub fn has_repository(&self) -> bool {
        self.probe(&["rev-parse", "--git-dir"])
    }

    /// Whether `git status --porcelain` reports anything.
    pub fn has_pending_changes(&self) -> bool {
        match self.run_git(&["status", "--porcelain"], "status") {
            Ok(stdout) => !stdout.trim().is_empty(),
            Err(e) => {
                debug!("Treating repository as clean: {e}");
                false
            }
        }
    }

    /// Run a git command and return its stdout.
    ///
    /// A non-zero exit becomes [`GitError::CommandFailed`] with the trimmed stderr.
    pub(crate) fn run_git(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn {
                operation: operation.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a git command for its exit status only.
    pub(crate) fn probe(&self, args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}
