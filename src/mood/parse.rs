//! Parsing of the completion provider's mood analysis reply.
//!
//! Models often wrap JSON in a markdown code fence, sometimes tagged `json`.
//! [`parse_analysis`] strips the fence, requires both top-level keys and
//! validates the mood object before anything leaves this module.

use serde::Deserialize;
use thiserror::Error;

use super::{MoodCategory, MoodRecord, SongHint, DEFAULT_INTENSITY};

/// Maximum number of song hints kept from a reply
pub const MAX_SONG_HINTS: usize = 5;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Reply is empty")]
    Empty,

    #[error("Reply is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reply is missing required key `{0}`")]
    MissingKey(&'static str),

    #[error("Score {0} is outside [-1, 1]")]
    ScoreOutOfRange(f64),

    #[error("Category {reported} does not match score {score} (expected {expected})")]
    InconsistentCategory {
        score: f64,
        reported: MoodCategory,
        expected: MoodCategory,
    },
}

/// Mood object as returned by the model
#[derive(Debug, Clone, Deserialize)]
pub struct AiMood {
    pub score: f64,
    #[serde(default)]
    pub magnitude: Option<f64>,
    #[serde(default, alias = "mood_category")]
    pub category: Option<MoodCategory>,
    #[serde(default, alias = "mood_description")]
    pub description: Option<String>,
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl AiMood {
    /// Validate and normalize into a [`MoodRecord`].
    ///
    /// The description always comes from the category so it stays tied to it;
    /// the model's summary and intensity are kept when present.
    pub fn into_record(self) -> Result<MoodRecord, ParseError> {
        if !self.score.is_finite() || !(-1.0..=1.0).contains(&self.score) {
            return Err(ParseError::ScoreOutOfRange(self.score));
        }

        let expected = MoodCategory::from_score(self.score);
        if let Some(reported) = self.category {
            if reported != expected {
                return Err(ParseError::InconsistentCategory {
                    score: self.score,
                    reported,
                    expected,
                });
            }
        }

        let magnitude = self
            .magnitude
            .filter(|m| m.is_finite() && *m >= 0.0)
            .unwrap_or(self.score.abs());

        let intensity = self
            .intensity
            .map(|i| i.trim().to_lowercase())
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| DEFAULT_INTENSITY.to_string());

        let summary = self
            .summary
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| expected.summary().to_string());

        Ok(MoodRecord {
            score: self.score,
            magnitude,
            category: expected,
            description: expected.description().to_string(),
            intensity,
            summary,
        })
    }
}

/// A validated AI analysis
#[derive(Debug, Clone)]
pub struct AiAnalysis {
    pub mood: MoodRecord,
    pub songs: Vec<SongHint>,
}

#[derive(Deserialize)]
struct RawReply {
    #[serde(default)]
    mood_analysis: Option<AiMood>,
    #[serde(default)]
    song_recommendations: Option<Vec<serde_json::Value>>,
}

/// Hints that parse and carry a title; anything else is dropped on its own.
fn song_hints(entries: Vec<serde_json::Value>) -> Vec<SongHint> {
    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<SongHint>(entry).ok())
        .filter(|hint| !hint.title.trim().is_empty())
        .take(MAX_SONG_HINTS)
        .collect()
}

/// Remove a surrounding markdown code fence, if any.
///
/// Returns the trimmed text between the first fence (minus its info string,
/// e.g. `json`) and the next one. Text without a fence is returned trimmed.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };

    let after = &trimmed[start + 3..];
    let body = match after.find('\n') {
        Some(newline)
            if after[..newline]
                .trim()
                .chars()
                .all(|c| c.is_ascii_alphanumeric()) =>
        {
            &after[newline + 1..]
        }
        _ => after.strip_prefix("json").unwrap_or(after),
    };

    let end = body.find("```").unwrap_or(body.len());
    body[..end].trim()
}

/// Parse a model reply into a validated analysis
pub fn parse_analysis(reply: &str) -> Result<AiAnalysis, ParseError> {
    let body = strip_code_fence(reply);
    if body.is_empty() {
        return Err(ParseError::Empty);
    }

    let raw: RawReply = serde_json::from_str(body)?;
    let mood = raw
        .mood_analysis
        .ok_or(ParseError::MissingKey("mood_analysis"))?;
    let songs = raw
        .song_recommendations
        .map(song_hints)
        .ok_or(ParseError::MissingKey("song_recommendations"))?;

    Ok(AiAnalysis {
        mood: mood.into_record()?,
        songs,
    })
}
