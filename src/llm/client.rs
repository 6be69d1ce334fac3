use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::llm::openai::OpenAiClient;
use crate::llm::prompts::Conversation;

/// Why a completion request produced no text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("quota or rate limit exceeded: {0}")]
    Quota(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl CompletionError {
    /// Classify a non-success HTTP status and its body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = error_message(body);
        match status.as_u16() {
            401 | 403 => Self::Authentication(message),
            429 => Self::Quota(message),
            code => Self::Api {
                status: code,
                message,
            },
        }
    }
}

/// Pull `error.message` out of a JSON error body, else return the body itself
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Completion request payload.
pub struct CompletionRequest<'a> {
    pub conversation: &'a Conversation,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short provider name for log messages
    fn name(&self) -> &str;

    async fn complete(
        &self,
        request: CompletionRequest<'_>,
    ) -> std::result::Result<String, CompletionError>;
}

/// Build a completion provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn CompletionProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAiClient::from_settings(settings)?)),
        "gemini" => Ok(Box::new(GeminiClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: openai, gemini",
            other
        ),
    }
}
