//! Commit message generation through a chat-completion API.

pub mod generator;
pub mod openai;
pub mod prompt;

pub use generator::MessageGenerator;
pub use openai::{DEFAULT_API_URL, MAX_TOKENS, MODEL, OpenAiClient, TEMPERATURE};
pub use prompt::{SYSTEM_PROMPT, build_commit_prompt};
