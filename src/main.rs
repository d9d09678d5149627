//! aicommit - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use aicommit::config::ConfigStore;
use aicommit::error::{FlowError, GenerationError};
use aicommit::flow::{self, MenuAction, TerminalPrompter};
use aicommit::git::{GitRepo, check_git_installed};
use aicommit::llm::OpenAiClient;

/// Generate conventional commit messages from your changes using OpenAI.
#[derive(Parser, Debug)]
#[command(name = "aicommit")]
#[command(about = "Generate conventional commit messages from your changes using OpenAI")]
#[command(version)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a commit message and commit
    Commit {
        /// Compare with this branch instead of asking
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Configure the OpenAI API key
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "aicommit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut prompter = TerminalPrompter::new();

    match cli.command {
        Some(Command::Commit { branch }) => commit_command(&mut prompter, branch).await,
        Some(Command::Config) => config_command(&mut prompter),
        None => match flow::main_menu(&mut prompter)? {
            MenuAction::Commit => commit_command(&mut prompter, None).await,
            MenuAction::Config => config_command(&mut prompter),
            MenuAction::Exit => Ok(()),
        },
    }
}

async fn commit_command(prompter: &mut TerminalPrompter, branch: Option<String>) -> Result<()> {
    check_git_installed().context("git is required")?;

    let store = ConfigStore::default_location()?;
    let config = store.read();
    let repo = GitRepo::open(".");
    let client = OpenAiClient::from_config(&config)?;

    let outcome = flow::run_commit(&config, &repo, &client, prompter, branch).await?;
    debug!("Commit flow finished: {:?}", outcome);

    Ok(())
}

fn config_command(prompter: &mut TerminalPrompter) -> Result<()> {
    let store = ConfigStore::default_location()?;
    let outcome = flow::run_config(&store, prompter)?;
    debug!("Config flow finished: {:?}", outcome);

    Ok(())
}

fn report_error(error: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), error);

    let credential_problem = match error.downcast_ref::<FlowError>() {
        Some(FlowError::Generation(e)) => e.is_credential_error(),
        _ => error
            .downcast_ref::<GenerationError>()
            .is_some_and(GenerationError::is_credential_error),
    };
    if credential_problem {
        eprintln!("{}", "Check your API key with: aicommit config".yellow());
    }
}
