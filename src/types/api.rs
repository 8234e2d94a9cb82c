//! API request and response types for recommendation and transcription.

use serde::{Deserialize, Serialize};

use crate::catalog::TrackRecord;
use crate::mood::{MoodCategory, MoodRecord};

/// Request to analyze mood text and recommend songs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// Free-text mood description
    #[serde(default)]
    pub text: Option<String>,
}

/// Mood analysis as exposed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalysisView {
    pub category: MoodCategory,
    pub description: String,
    pub summary: String,
    pub score: f64,
    pub intensity: String,
}

impl From<MoodRecord> for MoodAnalysisView {
    fn from(record: MoodRecord) -> Self {
        Self {
            category: record.category,
            description: record.description,
            summary: record.summary,
            score: record.score,
            intensity: record.intensity,
        }
    }
}

/// Response from the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub mood_analysis: MoodAnalysisView,
    pub songs: Vec<TrackRecord>,
}

/// Response from the transcribe endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub transcript: String,
    pub filename: String,
    /// Rough audio length in seconds
    pub duration_estimate: f64,
}
