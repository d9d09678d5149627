//! Conventional commit message model.

pub mod message;

pub use message::{CommitHeader, CommitMessage, CommitType, FormatIssue, MAX_TITLE_LENGTH};
