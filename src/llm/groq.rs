//! Groq chat completions client.
//!
//! Groq exposes an OpenAI-compatible `/chat/completions` endpoint, so this
//! client works against any service implementing that API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::provider::{CompletionOptions, CompletionProvider, LlmError};
use crate::config::AiConfig;

/// OpenAI-compatible completion provider authenticated with a bearer key.
pub struct GroqClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    options: CompletionOptions,
}

impl GroqClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://api.groq.com/openai/v1").
    /// * `model` - Model to use.
    /// * `api_key` - API key sent as a bearer token.
    /// * `options` - Sampling options and request timeout.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        options: CompletionOptions,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .user_agent(concat!("groovi/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            options,
        })
    }

    /// Build a client from configuration.
    ///
    /// Returns `Ok(None)` when no API key is configured.
    pub fn from_config(config: &AiConfig) -> Result<Option<Self>, LlmError> {
        let Some(api_key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };

        let options = CompletionOptions {
            temperature: config.temperature,
            max_tokens: Some(config.max_tokens),
            timeout: Duration::from_secs(config.timeout_secs),
        };

        Self::new(&config.base_url, &config.model, api_key, options).map(Some)
    }
}

#[async_trait]
impl CompletionProvider for GroqClient {
    fn name(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: Some(self.options.temperature),
            max_tokens: self.options.max_tokens,
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .timeout(self.options.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(LlmError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            LlmError::InvalidResponse(format!("Failed to parse completion response: {e}"))
        })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LlmError::InvalidResponse(
                "Completion response has no content".to_string(),
            ));
        }

        debug!(reply_len = content.len(), "Received completion response");
        Ok(content)
    }
}

// OpenAI-compatible wire types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
