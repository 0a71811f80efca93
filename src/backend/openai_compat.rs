//! Chat-completions client for any OpenAI-compatible endpoint.

use super::{BackendError, ChatMessage, CompletionRequest, GenerativeBackend, ProviderProfile};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client bound to one provider profile.
pub struct OpenAiCompatBackend {
    client: reqwest::Client,
    profile: ProviderProfile,
}

impl OpenAiCompatBackend {
    pub fn new(profile: ProviderProfile) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, profile })
    }

    pub fn model(&self) -> &str {
        self.profile.model
    }
}

#[async_trait]
impl GenerativeBackend for OpenAiCompatBackend {
    fn provider_name(&self) -> &str {
        self.profile.name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, BackendError> {
        let url = format!("{}/chat/completions", self.profile.base_url);
        let body = CompletionBody {
            model: self.profile.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.profile.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                provider = self.profile.name,
                status = status.as_u16(),
                "completion request rejected"
            );
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(BackendError::EmptyResponse)?;
        Ok(content)
    }
}
