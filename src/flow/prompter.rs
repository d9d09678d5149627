//! User interaction, separated from flow decisions.
//!
//! Flows ask questions and report progress through [`Prompter`]. The terminal
//! implementation uses dialoguer; tests supply canned answers.

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Password, Select};

/// Outcome of the comparison-branch question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetChoice {
    Branch(String),
    /// Skip branch comparison and describe local changes only.
    LocalOnly,
}

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Commit,
    Config,
    Exit,
}

/// Everything a flow tells the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Banner,
    Goodbye,
    MissingCredential,
    NotARepository,
    CurrentBranch(String),
    NoOtherBranches,
    ComparingWith(String),
    LocalChangesOnly,
    DiffFailed(String),
    FirstCommitHint,
    NoChanges,
    ChangesFound(usize),
    GeneratingMessage,
    GeneratedMessage(String),
    Committed,
    Cancelled,
    ConfigHeader,
    CredentialAlreadyConfigured,
    InvalidApiKey(String),
    CredentialSaved,
}

/// Asks the user questions and shows notices.
pub trait Prompter {
    /// Pick a branch from `branches` (pre-selecting `default`) or local changes only.
    fn select_target(
        &mut self,
        branches: &[String],
        default: usize,
    ) -> Result<TargetChoice, dialoguer::Error>;

    /// Confirm committing the message just shown. Defaults to yes.
    fn confirm_commit(&mut self) -> Result<bool, dialoguer::Error>;

    /// Confirm replacing a stored API key. Defaults to no.
    fn confirm_reconfigure(&mut self) -> Result<bool, dialoguer::Error>;

    /// Read an API key. Validation is done by the caller.
    fn api_key(&mut self) -> Result<String, dialoguer::Error>;

    fn main_menu(&mut self) -> Result<MenuAction, dialoguer::Error>;

    fn notify(&mut self, notice: Notice);
}

/// Interactive terminal prompter.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

const LOCAL_ONLY_LABEL: &str = "Local changes only (don't compare with a branch)";
const SEPARATOR_WIDTH: usize = 50;

impl Prompter for TerminalPrompter {
    fn select_target(
        &mut self,
        branches: &[String],
        default: usize,
    ) -> Result<TargetChoice, dialoguer::Error> {
        let mut items: Vec<&str> = branches.iter().map(String::as_str).collect();
        items.push(LOCAL_ONLY_LABEL);

        let index = Select::with_theme(&self.theme)
            .with_prompt("Choose the branch to compare with")
            .items(&items)
            .default(default)
            .interact()?;

        Ok(branches
            .get(index)
            .cloned()
            .map_or(TargetChoice::LocalOnly, TargetChoice::Branch))
    }

    fn confirm_commit(&mut self) -> Result<bool, dialoguer::Error> {
        Confirm::with_theme(&self.theme)
            .with_prompt("Commit with this message?")
            .default(true)
            .interact()
    }

    fn confirm_reconfigure(&mut self) -> Result<bool, dialoguer::Error> {
        Confirm::with_theme(&self.theme)
            .with_prompt("Reconfigure the API key?")
            .default(false)
            .interact()
    }

    fn api_key(&mut self) -> Result<String, dialoguer::Error> {
        Password::with_theme(&self.theme)
            .with_prompt("Enter your OpenAI API key")
            .allow_empty_password(true)
            .interact()
    }

    fn main_menu(&mut self) -> Result<MenuAction, dialoguer::Error> {
        let actions = [
            ("Generate and commit", MenuAction::Commit),
            ("Configure API key", MenuAction::Config),
            ("Exit", MenuAction::Exit),
        ];
        let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();

        let index = Select::with_theme(&self.theme)
            .with_prompt("What do you want to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        Ok(actions.get(index).map_or(MenuAction::Exit, |(_, action)| *action))
    }

    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Banner => println!("\n{}\n", "AICommit - automatic commit messages".blue().bold()),
            Notice::Goodbye => println!("{}", "Bye!".blue()),
            Notice::MissingCredential => {
                println!("{}", "OpenAI API key is not configured.".red());
                println!("{}", "Run: aicommit config".yellow());
            }
            Notice::NotARepository => println!("{}", "Not a git repository.".red()),
            Notice::CurrentBranch(branch) => {
                println!("{}", format!("Current branch: {branch}").blue())
            }
            Notice::NoOtherBranches => {
                println!("{}", "No other branches available to compare with.".yellow());
                println!("{}", "Checking uncommitted local changes...".blue());
            }
            Notice::ComparingWith(branch) => println!("{}", format!("Comparing with: {branch}").blue()),
            Notice::LocalChangesOnly => println!("{}", "Analyzing local changes".blue()),
            Notice::DiffFailed(reason) => {
                println!("{}", "Failed to read changes:".red());
                println!("   {}", reason.yellow());
            }
            Notice::FirstCommitHint => {
                println!("\n{}", "Tip: for new repositories, make the first commit manually:".blue());
                println!("{}", "   git add -A".cyan());
                println!("{}", "   git commit -m \"feat: initial commit\"".cyan());
            }
            Notice::NoChanges => println!("{}", "No changes found.".yellow()),
            Notice::ChangesFound(lines) => {
                println!("{}", format!("Changes found ({lines} lines)").green())
            }
            Notice::GeneratingMessage => println!("{}", "Generating commit message...".blue()),
            Notice::GeneratedMessage(message) => {
                let separator = "─".repeat(SEPARATOR_WIDTH);
                println!("\n{}", "Generated commit message:".green());
                println!("{}", separator.cyan());
                println!("{message}");
                println!("{}", separator.cyan());
            }
            Notice::Committed => println!("{}", "Commit created.".green()),
            Notice::Cancelled => println!("{}", "Commit cancelled.".yellow()),
            Notice::ConfigHeader => println!("{}", "OpenAI API key configuration".blue()),
            Notice::CredentialAlreadyConfigured => {
                println!("{}", "An API key is already configured.".green())
            }
            Notice::InvalidApiKey(reason) => println!("{}", reason.red()),
            Notice::CredentialSaved => println!("{}", "API key saved.".green()),
        }
    }
}
