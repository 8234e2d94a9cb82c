//! The mood analysis engine.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::parse::{parse_analysis, ParseError, MAX_SONG_HINTS};
use super::sentiment::{SentimentScorer, VaderScorer};
use super::{MoodRecord, SongHint};
use crate::llm::{CompletionProvider, LlmError};

#[derive(Debug, Error)]
enum AiAnalysisError {
    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Turns free text into a [`MoodRecord`] plus optional song hints.
///
/// The completion provider is tried first; any failure there (including a
/// missing provider) falls back to the deterministic scorer, which cannot
/// fail. Callers therefore always get a record back.
pub struct MoodAnalyzer {
    provider: Option<Arc<dyn CompletionProvider>>,
    scorer: Arc<dyn SentimentScorer>,
}

impl MoodAnalyzer {
    pub fn new(
        provider: Option<Arc<dyn CompletionProvider>>,
        scorer: Arc<dyn SentimentScorer>,
    ) -> Self {
        Self { provider, scorer }
    }

    /// Analyzer that only uses the local VADER scorer
    pub fn deterministic() -> Self {
        Self::new(None, Arc::new(VaderScorer::new()))
    }

    /// Whether a completion provider is configured
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Analyze `text`, preferring the completion provider.
    ///
    /// Expects non-empty text; the HTTP layer rejects empty input before
    /// calling this.
    pub async fn analyze(&self, text: &str) -> (MoodRecord, Vec<SongHint>) {
        if let Some(provider) = &self.provider {
            match self.analyze_with_provider(provider.as_ref(), text).await {
                Ok(result) => return result,
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "AI mood analysis failed, falling back to VADER scorer");
                }
            }
        }

        (self.analyze_deterministic(text), Vec::new())
    }

    /// Score `text` locally and map it to the template record for its band
    pub fn analyze_deterministic(&self, text: &str) -> MoodRecord {
        let record = MoodRecord::from_score(self.scorer.score(text));
        debug!(score = record.score, category = %record.category, "Deterministic mood analysis");
        record
    }

    async fn analyze_with_provider(
        &self,
        provider: &dyn CompletionProvider,
        text: &str,
    ) -> Result<(MoodRecord, Vec<SongHint>), AiAnalysisError> {
        let reply = provider.complete(&build_prompt(text)).await?;
        let analysis = parse_analysis(&reply)?;

        info!(
            provider = provider.name(),
            model = provider.model(),
            category = %analysis.mood.category,
            hints = analysis.songs.len(),
            "AI mood analysis succeeded"
        );

        Ok((analysis.mood, analysis.songs))
    }
}

/// Prompt asking for a mood object and song hints as JSON
fn build_prompt(text: &str) -> String {
    // Quote the user text as a JSON string so it cannot break the prompt layout
    let quoted = serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""));

    format!(
        r#"Analyze this text for mood and recommend {MAX_SONG_HINTS} songs.
Text: {quoted}

Return JSON only:
{{
    "mood_analysis": {{
        "score": 0.5,
        "magnitude": 0.7,
        "category": "Positive",
        "description": "You're in a good mood!",
        "intensity": "moderate",
        "summary": "80-120 word engaging summary celebrating the mood and connecting it to music"
    }},
    "song_recommendations": [
        {{"title": "Song", "artist": "Artist", "search_terms": ["term1", "term2"]}}
    ]
}}

Guidelines:
- score: -1.0 to 1.0
- category must follow the score: "Very Positive" (>= 0.5), "Positive" (0.1 to 0.5), "Neutral" (-0.1 to 0.1), "Negative" (-0.5 to -0.1), "Very Negative" (< -0.5)
- intensity: "mild", "moderate" or "very intense"
- Also try to uplift the mood if negative
- summary: positive, fun, 80-120 words connecting the mood to music
- {MAX_SONG_HINTS} popular songs matching the mood"#
    )
}
