//! aicommit - A CLI tool that writes conventional commit messages from your diff.
//!
//! # Overview
//!
//! aicommit reads the staged, unstaged or branch diff of the current git
//! repository, asks an OpenAI chat model for a conventional commit message,
//! shows it for confirmation and commits everything with it.

pub mod commit;
pub mod config;
pub mod error;
pub mod flow;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use commit::{CommitMessage, CommitType};
pub use config::{Config, ConfigStore};
pub use error::{CommitError, ConfigError, FlowError, GenerationError, GitError};
pub use flow::{CommitOutcome, ConfigOutcome, Prompter};
pub use git::{GitRepo, Vcs};
pub use llm::{MessageGenerator, OpenAiClient};
