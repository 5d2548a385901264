//! Completion client, the single point of entry for all model calls in the screener.
//!
//! No other module talks to the provider directly; flows receive an
//! `Arc<dyn CompletionClient>` so tests can substitute a stub.
//!
//! Model, seed and temperature are pinned so identical prompts reproduce identical output.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod json_repair;

/// The model used for every completion.
pub const MODEL: &str = "gpt-4o";
pub const SEED: u64 = 42;
pub const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,

    #[error("model returned empty content")]
    EmptyContent,
}

/// Sends one prompt as a single user message and returns the raw text reply,
/// expected to hold a JSON object.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub seed: u64,
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: &'static str,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn for_prompt(prompt: &'a str) -> Self {
        Self {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            seed: SEED,
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// OpenAI chat-completions backend. One synchronous call per prompt: no retries,
/// no streaming, no client-side timeout.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(api_key: Option<String>, base_url: &str) -> Result<Self, CompletionError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;
        let request_body = ChatCompletionRequest::for_prompt(prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(CompletionError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
