//! The commit flow: diff, generate, confirm, commit.

use tracing::{debug, warn};

use crate::commit::CommitMessage;
use crate::config::Config;
use crate::error::{FlowError, GitError};
use crate::git::{Vcs, diff_line_count};
use crate::llm::MessageGenerator;

use super::prompter::{Notice, Prompter, TargetChoice};

/// Branch pre-selected when it is among the candidates.
const PREFERRED_DEFAULT_BRANCH: &str = "main";

/// How a commit flow ended without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    MissingCredential,
    NotARepository,
    DiffFailed,
    NoChanges,
    Cancelled,
    Committed { message: String },
}

/// Run the commit flow.
///
/// `target` is the branch requested on the command line; `None` or a blank
/// name asks the user when other branches exist. Generation and commit failures are
/// returned as errors; every other ending is a [`CommitOutcome`].
pub async fn run_commit<V, G, P>(
    config: &Config,
    vcs: &V,
    generator: &G,
    prompter: &mut P,
    target: Option<String>,
) -> Result<CommitOutcome, FlowError>
where
    V: Vcs + ?Sized,
    G: MessageGenerator + ?Sized,
    P: Prompter + ?Sized,
{
    if !config.has_credential() {
        prompter.notify(Notice::MissingCredential);
        return Ok(CommitOutcome::MissingCredential);
    }

    if !vcs.has_repository() {
        prompter.notify(Notice::NotARepository);
        return Ok(CommitOutcome::NotARepository);
    }

    let current = vcs.current_branch()?;
    prompter.notify(Notice::CurrentBranch(current.clone()));
    debug!(
        "Repository has pending changes: {}",
        vcs.has_pending_changes()
    );

    let target = match target.filter(|b| !b.trim().is_empty()) {
        Some(branch) => Some(branch),
        None => resolve_target(vcs, prompter, &current)?,
    };

    match &target {
        Some(branch) => prompter.notify(Notice::ComparingWith(branch.clone())),
        None => prompter.notify(Notice::LocalChangesOnly),
    }

    let diff = match vcs.diff(target.as_deref()) {
        Ok(diff) => diff,
        Err(e) => {
            prompter.notify(Notice::DiffFailed(e.to_string()));
            if matches!(e, GitError::NoCommits) {
                prompter.notify(Notice::FirstCommitHint);
            }
            return Ok(CommitOutcome::DiffFailed);
        }
    };

    if diff.trim().is_empty() {
        prompter.notify(Notice::NoChanges);
        return Ok(CommitOutcome::NoChanges);
    }

    prompter.notify(Notice::ChangesFound(diff_line_count(&diff)));
    prompter.notify(Notice::GeneratingMessage);

    let message = generator.generate(&diff).await?;

    for issue in CommitMessage::parse(&message).format_issues() {
        warn!("Generated message deviates from the requested format: {issue}");
    }

    prompter.notify(Notice::GeneratedMessage(message.clone()));

    if !prompter.confirm_commit()? {
        prompter.notify(Notice::Cancelled);
        return Ok(CommitOutcome::Cancelled);
    }

    vcs.create_commit(&message)?;
    prompter.notify(Notice::Committed);

    Ok(CommitOutcome::Committed { message })
}

/// Ask which branch to compare with, or fall back to local changes.
fn resolve_target<V, P>(
    vcs: &V,
    prompter: &mut P,
    current: &str,
) -> Result<Option<String>, FlowError>
where
    V: Vcs + ?Sized,
    P: Prompter + ?Sized,
{
    let candidates: Vec<String> = vcs
        .list_comparable_branches()
        .into_iter()
        .filter(|b| b != current)
        .collect();

    if candidates.is_empty() {
        prompter.notify(Notice::NoOtherBranches);
        return Ok(None);
    }

    let default = default_branch_index(&candidates);
    match prompter.select_target(&candidates, default)? {
        TargetChoice::Branch(branch) => Ok(Some(branch)),
        TargetChoice::LocalOnly => Ok(None),
    }
}

/// Index of `main` among `candidates`, else 0.
pub fn default_branch_index(candidates: &[String]) -> usize {
    candidates
        .iter()
        .position(|b| b == PREFERRED_DEFAULT_BRANCH)
        .unwrap_or(0)
}
