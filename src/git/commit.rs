//! Staging and committing.

use crate::error::CommitError;

use super::runner::GitRepo;

impl GitRepo {
    /// Stage all changes (like `git add -A`) and commit with `message`.
    ///
    /// The message is passed as its own argument, so quotes, backticks and
    /// `$` reach git unchanged.
    pub fn create_commit(&self, message: &str) -> Result<(), CommitError> {
        self.run_git(&["add", "-A"], "stage changes")
            .map_err(CommitError::StagingFailed)?;

        self.run_git(&["commit", "-m", message], "create commit")
            .map_err(CommitError::CommitFailed)?;

        Ok(())
    }
}
