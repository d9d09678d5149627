//! User-facing flows: commit, config and the main menu.

pub mod commit;
pub mod config;
pub mod prompter;

pub use commit::{CommitOutcome, default_branch_index, run_commit};
pub use config::{ConfigOutcome, run_config};
pub use prompter::{MenuAction, Notice, Prompter, TargetChoice, TerminalPrompter};

use crate::error::FlowError;

/// Show the banner and ask what to do.
pub fn main_menu<P>(prompter: &mut P) -> Result<MenuAction, FlowError>
where
    P: Prompter + ?Sized,
{
    prompter.notify(Notice::Banner);
    let action = prompter.main_menu()?;
    if action == MenuAction::Exit {
        prompter.notify(Notice::Goodbye);
    }
    Ok(action)
}
