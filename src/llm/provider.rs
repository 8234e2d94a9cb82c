//! Completion provider trait definition.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Options for a completion request.
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative).
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: Some(2048),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Errors that can occur when talking to a completion provider.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Request timeout")]
    Timeout,
}

/// A generative model reachable through a single-prompt completion call.
///
/// Implementations are shared across requests, so they must be safe to call
/// concurrently.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name (e.g. "groq").
    fn name(&self) -> &str;

    /// Model being used.
    fn model(&self) -> &str;

    /// Send a single user prompt and return the raw text of the reply.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}
