//! Audio transcription endpoint.

use axum::extract::{Multipart, State};
use bytes::Bytes;
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::transcribe::{
    estimate_duration, is_allowed_content_type, TranscribeError, ALLOWED_CONTENT_TYPES,
};
use crate::types::TranscriptionResponse;

use super::extractors::ResponseFormat;
use super::routes::Reply;
use super::AppState;

/// Multipart field carrying the recording
const AUDIO_FIELD: &str = "audio";

struct AudioUpload {
    filename: String,
    content_type: String,
    data: Bytes,
}

/// Transcribe an uploaded recording to text
///
/// POST /transcribe (multipart, field `audio`)
pub async fn transcribe(
    State(state): State<AppState>,
    format: ResponseFormat,
    multipart: Multipart,
) -> Result<Reply<TranscriptionResponse>> {
    let Some(transcriber) = state.transcriber.clone() else {
        return Err(AppError::ServiceUnavailable(
            "Transcription is not configured".to_string(),
        ));
    };

    let upload = read_audio_field(multipart).await?;

    if !is_allowed_content_type(&upload.content_type) {
        return Err(AppError::BadRequest(format!(
            "Invalid file type. Allowed: {}",
            ALLOWED_CONTENT_TYPES.join(", ")
        )));
    }

    let max_bytes = state.config.transcription.max_upload_bytes;
    if upload.data.len() > max_bytes {
        return Err(AppError::BadRequest(format!(
            "File too large. Max {} MB allowed.",
            max_bytes / (1024 * 1024)
        )));
    }
    if upload.data.is_empty() {
        return Err(AppError::BadRequest("Audio file is empty".to_string()));
    }

    let byte_len = upload.data.len();
    let transcript = transcriber
        .transcribe(upload.data, &upload.content_type)
        .await
        .map_err(|e| match e {
            TranscribeError::NoSpeech => AppError::BadRequest(e.to_string()),
            other => {
                warn!(provider = transcriber.name(), error = %other, "Transcription failed");
                AppError::BadGateway(format!("Transcription failed: {other}"))
            }
        })?;

    info!(bytes = byte_len, chars = transcript.len(), "Audio transcribed");

    Ok(Reply::new(
        format,
        TranscriptionResponse {
            transcript,
            filename: upload.filename,
            duration_estimate: estimate_duration(byte_len),
        },
    ))
}

async fn read_audio_field(mut multipart: Multipart) -> Result<AudioUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("audio").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        return Ok(AudioUpload {
            filename,
            content_type,
            data,
        });
    }

    Err(AppError::BadRequest(format!(
        "Missing `{AUDIO_FIELD}` file field"
    )))
}
