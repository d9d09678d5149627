//! Error types for aicommit modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the per-user config store.
///
/// Only the write path surfaces these; reads degrade to an empty config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the home directory for the config file")]
    NoHomeDir,

    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors from git subprocess operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found. Install git and make sure it is on your PATH")]
    NotInstalled,

    #[error("Failed to run git {operation}: {source}")]
    Spawn {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },

    #[error("Branch \"{0}\" does not exist. Use a valid branch.")]
    BranchNotFound(String),

    #[error("Repository has no commits yet. Make the first commit manually.")]
    NoCommits,
}

/// Errors from staging and committing.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to stage changes: {0}")]
    StagingFailed(#[source] GitError),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] GitError),
}

/// Errors from commit message generation.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("OpenAI API key is not configured. Run: aicommit config")]
    MissingCredential,

    #[error("OpenAI API key is invalid or expired: {0}")]
    InvalidCredential(String),

    #[error("Request to the completion API failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Completion API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Could not generate a commit message (empty response)")]
    EmptyResponse,

    #[error("Completion API returned an unreadable response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// Whether reconfiguring the credential could fix this error.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            GenerationError::MissingCredential | GenerationError::InvalidCredential(_)
        )
    }
}

/// Errors that end a commit or config flow.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}
