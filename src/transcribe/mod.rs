//! Speech-to-text for recorded mood descriptions.

mod deepgram;

pub use deepgram::DeepgramClient;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Upload content types accepted for transcription
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "audio/mpeg",
    "audio/wav",
    "audio/webm",
    "audio/ogg",
    "audio/mp4",
    "audio/x-m4a",
];

/// Bytes per second of 16 kHz, 16-bit mono audio
const BYTES_PER_SECOND: f64 = 16_000.0 * 2.0;

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("No speech detected in audio")]
    NoSpeech,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// A speech-to-text provider
#[async_trait]
pub trait Transcriber: Send + Sync {
    fn name(&self) -> &str;

    /// Transcribe an audio upload, returning non-empty text.
    async fn transcribe(&self, audio: Bytes, content_type: &str) -> Result<String, TranscribeError>;
}

/// Whether `content_type` is an accepted audio upload type.
///
/// Parameters such as `; codecs=opus` are ignored.
pub fn is_allowed_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ALLOWED_CONTENT_TYPES.contains(&essence.as_str())
}

/// Rough duration in seconds, assuming uncompressed 16 kHz 16-bit mono
pub fn estimate_duration(byte_len: usize) -> f64 {
    byte_len as f64 / BYTES_PER_SECOND
}
