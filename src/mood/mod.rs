//! Mood analysis: turning free text into a categorized mood record.
//!
//! The [`MoodAnalyzer`] asks a completion provider for a structured analysis
//! and falls back to the local VADER scorer whenever that fails. Either way
//! the category on the returned [`MoodRecord`] is derived from its score via
//! the band table in [`bands`].

mod analyzer;
pub mod bands;
pub mod parse;
pub mod sentiment;

pub use analyzer::MoodAnalyzer;
pub use bands::{band_for_category, band_for_score, MoodBand, BANDS};
pub use parse::{parse_analysis, strip_code_fence, AiAnalysis, AiMood, ParseError};
pub use sentiment::{SentimentScorer, VaderScorer};

use serde::{de, Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Intensity reported when the analyzer does not provide one
pub const DEFAULT_INTENSITY: &str = "moderate";

/// Sentiment category, from most positive to most negative.
///
/// Serializes as its label (`"Very Positive"`). Deserializing ignores case,
/// spaces, underscores and dashes, so `very_positive` and `VeryPositive` are
/// accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoodCategory {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    #[serde(rename = "Very Negative")]
    VeryNegative,
}

#[derive(Debug, Error)]
#[error("Unknown mood category `{0}`")]
pub struct UnknownCategory(String);

impl FromStr for MoodCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|&c| !(c.is_whitespace() || c == '_' || c == '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "verypositive" => Ok(MoodCategory::VeryPositive),
            "positive" => Ok(MoodCategory::Positive),
            "neutral" => Ok(MoodCategory::Neutral),
            "negative" => Ok(MoodCategory::Negative),
            "verynegative" => Ok(MoodCategory::VeryNegative),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for MoodCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 5] = [
        MoodCategory::VeryPositive,
        MoodCategory::Positive,
        MoodCategory::Neutral,
        MoodCategory::Negative,
        MoodCategory::VeryNegative,
    ];

    /// Category for a sentiment score
    pub fn from_score(score: f64) -> Self {
        band_for_score(score).category
    }

    /// Human-readable label, as serialized
    pub fn label(&self) -> &'static str {
        match self {
            MoodCategory::VeryPositive => "Very Positive",
            MoodCategory::Positive => "Positive",
            MoodCategory::Neutral => "Neutral",
            MoodCategory::Negative => "Negative",
            MoodCategory::VeryNegative => "Very Negative",
        }
    }

    /// Identifier safe for use inside URIs
    pub fn slug(&self) -> &'static str {
        match self {
            MoodCategory::VeryPositive => "very_positive",
            MoodCategory::Positive => "positive",
            MoodCategory::Neutral => "neutral",
            MoodCategory::Negative => "negative",
            MoodCategory::VeryNegative => "very_negative",
        }
    }

    pub fn description(&self) -> &'static str {
        band_for_category(*self).description
    }

    pub fn summary(&self) -> &'static str {
        band_for_category(*self).summary
    }
}

impl std::fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized result of mood analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRecord {
    /// Polarity (-1.0 to 1.0)
    pub score: f64,
    /// Intensity irrespective of polarity (>= 0.0)
    pub magnitude: f64,
    /// Category derived from `score`
    pub category: MoodCategory,
    /// Short label tied to `category`
    pub description: String,
    /// Qualitative intensity (`mild`, `moderate`, `very intense`)
    pub intensity: String,
    /// Narrative summary
    pub summary: String,
}

impl MoodRecord {
    /// Build the template record for a score.
    ///
    /// The score is clamped to [-1, 1]; a NaN score becomes 0.
    pub fn from_score(score: f64) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(-1.0, 1.0)
        };
        let band = band_for_score(score);

        Self {
            score,
            magnitude: score.abs(),
            category: band.category,
            description: band.description.to_string(),
            intensity: DEFAULT_INTENSITY.to_string(),
            summary: band.summary.to_string(),
        }
    }

    /// Whether the category agrees with the score
    pub fn is_consistent(&self) -> bool {
        self.category == MoodCategory::from_score(self.score)
    }
}

/// A song suggested by the AI analyzer, not yet resolved against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongHint {
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub search_terms: Vec<String>,
}

impl SongHint {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            search_terms: Vec::new(),
        }
    }

    /// Catalog query for this hint
    pub fn query(&self) -> String {
        format!("{} {}", self.title, self.artist).trim().to_string()
    }
}
