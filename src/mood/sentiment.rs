//! Deterministic lexical sentiment scoring.
//!
//! [`VaderScorer`] runs VADER (valence lexicon plus rules for boosters,
//! negation, contrastive "but", shouting and punctuation) and reports its
//! compound score. It needs no network access and cannot fail.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores text polarity without external calls
pub trait SentimentScorer: Send + Sync {
    /// Compound score in [-1.0, 1.0]
    fn score(&self, text: &str) -> f64;
}

/// VADER compound-score scorer
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let compound = self
            .analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0);

        if compound.is_finite() {
            compound.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}
