//! Score bands for mood categorization.
//!
//! Each band owns the lower bound of its score range plus the fixed
//! description and summary shown when the deterministic analyzer is used.
//! Bands are ordered from the highest lower bound to the lowest; the first
//! band whose lower bound the score reaches wins.

use super::MoodCategory;

/// A mood band with its threshold and presentation text
#[derive(Debug, Clone)]
pub struct MoodBand {
    /// Category assigned to scores in this band
    pub category: MoodCategory,
    /// Inclusive lower bound of the band
    pub lower: f64,
    /// Short label shown next to the category
    pub description: &'static str,
    /// Narrative shown when no AI summary is available
    pub summary: &'static str,
}

// ============================================================================
// Bands (highest first)
// ============================================================================

/// score >= 0.5
pub const BAND_VERY_POSITIVE: MoodBand = MoodBand {
    category: MoodCategory::VeryPositive,
    lower: 0.5,
    description: "You're feeling fantastic and energetic!",
    summary: "What an incredible energy you're radiating! Your positivity is infectious \
              and it's the perfect time to celebrate with music that matches your soaring \
              spirits. Whether you're dancing or conquering the world, these songs will \
              amplify your amazing mood and keep those good vibes flowing!",
};

/// 0.1 <= score < 0.5
pub const BAND_POSITIVE: MoodBand = MoodBand {
    category: MoodCategory::Positive,
    lower: 0.1,
    description: "You're in a good, upbeat mood!",
    summary: "You're glowing with positive energy! This upbeat mood calls for music that \
              celebrates life's wonderful moments. These songs will be your perfect \
              companions as you ride this wave of happiness. Let the melodies lift you \
              even higher!",
};

/// -0.1 <= score < 0.1
pub const BAND_NEUTRAL: MoodBand = MoodBand {
    category: MoodCategory::Neutral,
    lower: -0.1,
    description: "You're feeling calm and balanced.",
    summary: "There's something beautiful about finding balance in life. This peaceful \
              state is perfect for discovering music that speaks to your soul. These songs \
              will complement your tranquil mood and add a gentle spark to your day.",
};

/// -0.5 <= score < -0.1
pub const BAND_NEGATIVE: MoodBand = MoodBand {
    category: MoodCategory::Negative,
    lower: -0.5,
    description: "You're feeling a bit down or melancholic.",
    summary: "Life has its challenging moments, and music has this incredible power to be \
              your companion through them. These songs offer comfort, hope, and a reminder \
              that you're not alone. Music can be the bridge that carries us back to \
              brighter days.",
};

/// score < -0.5
pub const BAND_VERY_NEGATIVE: MoodBand = MoodBand {
    category: MoodCategory::VeryNegative,
    lower: f64::NEG_INFINITY,
    description: "You're going through a tough time.",
    summary: "In your darkest moments, music becomes a lifeline. These songs are chosen \
              with care to honor your feelings while gently offering hope and healing. \
              You're stronger than you know, and sometimes recovery begins with the right \
              song.",
};

/// All bands, highest lower bound first
pub const BANDS: &[MoodBand] = &[
    BAND_VERY_POSITIVE,
    BAND_POSITIVE,
    BAND_NEUTRAL,
    BAND_NEGATIVE,
    BAND_VERY_NEGATIVE,
];

/// Find the band a score falls into.
///
/// NaN is treated as a neutral score.
pub fn band_for_score(score: f64) -> &'static MoodBand {
    if score.is_nan() {
        return &BANDS[2];
    }
    BANDS
        .iter()
        .find(|band| score >= band.lower)
        .unwrap_or(&BANDS[BANDS.len() - 1])
}

/// Find the band for a category
pub fn band_for_category(category: MoodCategory) -> &'static MoodBand {
    match category {
        MoodCategory::VeryPositive => &BANDS[0],
        MoodCategory::Positive => &BANDS[1],
        MoodCategory::Neutral => &BANDS[2],
        MoodCategory::Negative => &BANDS[3],
        MoodCategory::VeryNegative => &BANDS[4],
    }
}
