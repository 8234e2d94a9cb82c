//! Deepgram pre-recorded transcription client.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{TranscribeError, Transcriber};
use crate::config::TranscriptionConfig;

pub struct DeepgramClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    language: String,
}

impl DeepgramClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TranscribeError> {
        let client = Client::builder()
            .user_agent(concat!("groovi/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TranscribeError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            language: language.into(),
        })
    }

    /// Build a client from configuration.
    ///
    /// Returns `Ok(None)` when no API key is configured.
    pub fn from_config(config: &TranscriptionConfig) -> Result<Option<Self>, TranscribeError> {
        let Some(api_key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };

        Self::new(
            &config.base_url,
            api_key,
            &config.model,
            &config.language,
            Duration::from_secs(config.timeout_secs),
        )
        .map(Some)
    }
}

#[async_trait]
impl Transcriber for DeepgramClient {
    fn name(&self) -> &str {
        "deepgram"
    }

    async fn transcribe(&self, audio: Bytes, content_type: &str) -> Result<String, TranscribeError> {
        let url = format!("{}/listen", self.base_url);
        debug!(bytes = audio.len(), content_type, model = %self.model, "Sending audio for transcription");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Token {}", self.api_key))
            .header(CONTENT_TYPE, content_type)
            .query(&[
                ("model", self.model.as_str()),
                ("language", self.language.as_str()),
                ("smart_format", "true"),
                ("punctuate", "true"),
                ("diarize", "false"),
            ])
            .body(audio)
            .send()
            .await
            .map_err(|e| TranscribeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranscribeError::Api {
                status: status.as_u16(),
                message: if status == StatusCode::UNAUTHORIZED {
                    "invalid transcription API key".to_string()
                } else {
                    message
                },
            });
        }

        let body: ListenResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Parse(e.to_string()))?;

        let transcript = body
            .results
            .channels
            .into_iter()
            .next()
            .and_then(|channel| channel.alternatives.into_iter().next())
            .map(|alt| alt.transcript.trim().to_string())
            .unwrap_or_default();

        if transcript.is_empty() {
            return Err(TranscribeError::NoSpeech);
        }

        debug!(chars = transcript.len(), "Transcription complete");
        Ok(transcript)
    }
}

#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: ListenResults,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    #[serde(default)]
    channels: Vec<ListenChannel>,
}

#[derive(Debug, Deserialize)]
struct ListenChannel {
    #[serde(default)]
    alternatives: Vec<ListenAlternative>,
}

#[derive(Debug, Deserialize)]
struct ListenAlternative {
    #[serde(default)]
    transcript: String,
}
