//! The seam between the commit flow and the model backend.

use async_trait::async_trait;

use crate::error::GenerationError;

/// Turns a diff into a commit message.
///
/// This abstraction allows mocking the API call in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Generate a commit message for `diff`, trimmed of surrounding whitespace.
    async fn generate(&self, diff: &str) -> Result<String, GenerationError>;
}
