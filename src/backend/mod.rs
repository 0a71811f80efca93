//! Generative backend integration.
//!
//! One OpenAI-compatible chat-completions client serves both supported
//! providers; provider choice is a pure function of the configured keys so
//! the whole decision is testable offline. Everything downstream (pipeline)
//! talks to the [`GenerativeBackend`] trait and falls back to deterministic
//! output when no backend is available or a call fails.

mod json;
mod openai_compat;
mod prompts;
mod provider;

pub use json::extract_json_object;
pub use openai_compat::OpenAiCompatBackend;
pub use prompts::{
    build_chat_system_prompt, build_interpretation_prompt, clean_chat_text, detail_profile,
    DetailProfile, CHAT_UNAVAILABLE_TEXT, INTERPRETATION_SYSTEM_PROMPT,
};
pub use provider::{is_placeholder_key, select_provider, ProviderProfile};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sampling temperature for the interpretation call.
pub const INTERPRETATION_TEMPERATURE: f64 = 0.45;

/// Token budget for the interpretation call.
pub const INTERPRETATION_MAX_TOKENS: u32 = 3000;

/// Base chat temperature; each detail level above zero adds 0.03.
pub const CHAT_BASE_TEMPERATURE: f64 = 0.55;

/// Base chat token budget; each detail level adds 350.
pub const CHAT_BASE_MAX_TOKENS: u32 = 900;

/// Only the most recent turns of chat history are forwarded.
pub const CHAT_HISTORY_LIMIT: usize = 12;

/// One turn in a chat conversation, wire-compatible with the
/// chat-completions message format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A single chat-completions call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Backend call failures. The pipeline treats every variant as "fall back",
/// but the distinction matters for logging and for quota messaging.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("backend returned an empty completion")]
    EmptyResponse,
}

impl BackendError {
    /// Whether the provider rejected the call for exhausted quota.
    pub fn is_quota_exhausted(&self) -> bool {
        match self {
            BackendError::Api { body, .. } => body.to_lowercase().contains("insufficient_quota"),
            _ => false,
        }
    }
}

/// A provider that can run chat completions.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Provider label for logs and error messages.
    fn provider_name(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<String, BackendError>;
}

/// Chat temperature for a normalized detail level.
pub fn chat_temperature(detail_level: u8) -> f64 {
    CHAT_BASE_TEMPERATURE + f64::from(detail_level) * 0.03
}

/// Chat token budget for a normalized detail level.
pub fn chat_max_tokens(detail_level: u8) -> u32 {
    CHAT_BASE_MAX_TOKENS + u32::from(detail_level) * 350
}
