//! OpenAI chat-completion client.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::GenerationError;

use super::generator::MessageGenerator;
use super::prompt::{SYSTEM_PROMPT, build_commit_prompt};

/// Base URL of the OpenAI REST API.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Model used for every request.
pub const MODEL: &str = "gpt-4o-mini";

/// Output token cap.
pub const MAX_TOKENS: u32 = 500;

/// Low temperature so the same diff gives a consistent message.
pub const TEMPERATURE: f64 = 0.3;

/// Environment variable to override the API base URL.
const API_URL_ENV_VAR: &str = "AICOMMIT_API_URL";

/// Default HTTP timeout for the completion request.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "AICOMMIT_TIMEOUT";

/// Get the configured timeout duration.
///
/// Reads from AICOMMIT_TIMEOUT environment variable if set,
/// otherwise uses the default of 60 seconds.
///
/// Logs a warning if the environment variable is set but contains
/// an invalid value (non-numeric, empty, or negative).
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

fn get_base_url() -> String {
    match env::var(API_URL_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => DEFAULT_API_URL.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// Client for `POST {base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    /// Build a client. A missing key is only reported when [`generate`](MessageGenerator::generate) runs.
    pub fn new(api_key: Option<String>) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(get_timeout())
            .build()
            .map_err(GenerationError::Request)?;

        Ok(Self {
            http,
            base_url: get_base_url(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        Self::new(config.api_key().map(str::to_string))
    }

    /// Point the client at another OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl MessageGenerator for OpenAiClient {
    async fn generate(&self, diff: &str) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GenerationError::MissingCredential)?;

        let prompt = build_commit_prompt(diff);
        let request = ChatRequest {
            model: MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let url = self.endpoint();
        debug!("POST {} ({} prompt chars)", url, prompt.len());

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(GenerationError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Completion API error body: {}", body);
            return Err(classify_failure(status, &body));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        extract_message(completion)
    }
}

/// Map a non-success response to an error, tagging credential problems.
fn classify_failure(status: StatusCode, body: &str) -> GenerationError {
    let detail = serde_json::from_str::<ApiErrorBody>(body).ok().map(|b| b.error);

    let message = detail
        .as_ref()
        .map(|d| d.message.clone())
        .filter(|m| !m.is_empty())
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

    let code_is_key = detail
        .as_ref()
        .and_then(|d| d.code.as_ref())
        .and_then(|c| c.as_str())
        .is_some_and(|c| c == "invalid_api_key");

    if status == StatusCode::UNAUTHORIZED || code_is_key || message.contains("API key") {
        return GenerationError::InvalidCredential(message);
    }

    GenerationError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Take the first choice's text, trimmed.
fn extract_message(completion: ChatResponse) -> Result<String, GenerationError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(GenerationError::EmptyResponse)
}
