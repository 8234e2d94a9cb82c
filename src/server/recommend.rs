//! Mood analysis and playlist recommendation endpoint.

use axum::extract::State;
use tracing::{error, info};

use crate::error::{AppError, Result};
use crate::types::{RecommendRequest, RecommendResponse};

use super::extractors::{Payload, ResponseFormat};
use super::routes::Reply;
use super::AppState;

/// Analyze mood text and recommend five songs
///
/// POST /recommend
pub async fn recommend(
    State(state): State<AppState>,
    format: ResponseFormat,
    Payload(request): Payload<RecommendRequest>,
) -> Result<Reply<RecommendResponse>> {
    let text = validate_text(request.text.as_deref(), state.config.server.max_text_length)?;

    let (mood, hints) = state.analyzer.analyze(text).await;
    let songs = state.resolver.recommend(&mood, &hints).await;

    if songs.is_empty() {
        error!(category = %mood.category, "Playlist resolution produced no songs");
        return Err(AppError::NotFound(
            "Could not find song recommendations".to_string(),
        ));
    }

    info!(
        category = %mood.category,
        score = mood.score,
        songs = songs.len(),
        "Recommendation served"
    );

    Ok(Reply::new(
        format,
        RecommendResponse {
            mood_analysis: mood.into(),
            songs,
        },
    ))
}

/// Trimmed request text, or a 400 when it is missing, blank or too long.
fn validate_text(text: Option<&str>, max_chars: usize) -> Result<&str> {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::BadRequest("No text provided".to_string()));
    }

    let chars = text.chars().count();
    if chars > max_chars {
        return Err(AppError::BadRequest(format!(
            "Text is too long ({chars} characters, max {max_chars})"
        )));
    }

    Ok(text)
}
