//! Curated mood library.
//!
//! Hand-picked songs per mood category, used when catalog search needs a
//! starting point or is unavailable altogether.

mod songs;

pub use songs::{
    NEGATIVE_SONGS, NEUTRAL_SONGS, POSITIVE_SONGS, VERY_NEGATIVE_SONGS, VERY_POSITIVE_SONGS,
};

use std::collections::HashMap;

use crate::mood::MoodCategory;

/// A curated song entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuratedSong {
    pub title: &'static str,
    pub artist: &'static str,
    /// Broader catalog queries that match the song's feel
    pub search_terms: &'static [&'static str],
}

impl CuratedSong {
    /// Catalog query for this exact song
    pub fn query(&self) -> String {
        format!("{} {}", self.title, self.artist)
    }
}

/// Read-only mapping from mood category to curated songs
#[derive(Debug, Clone, Default)]
pub struct MoodLibrary {
    songs: HashMap<MoodCategory, Vec<CuratedSong>>,
}

impl MoodLibrary {
    /// The built-in library, with eight songs for every category
    pub fn builtin() -> Self {
        Self::default()
            .with_category(MoodCategory::VeryPositive, VERY_POSITIVE_SONGS.to_vec())
            .with_category(MoodCategory::Positive, POSITIVE_SONGS.to_vec())
            .with_category(MoodCategory::Neutral, NEUTRAL_SONGS.to_vec())
            .with_category(MoodCategory::Negative, NEGATIVE_SONGS.to_vec())
            .with_category(MoodCategory::VeryNegative, VERY_NEGATIVE_SONGS.to_vec())
    }

    /// Builder method to set the songs for a category
    pub fn with_category(mut self, category: MoodCategory, songs: Vec<CuratedSong>) -> Self {
        self.songs.insert(category, songs);
        self
    }

    /// Songs for a category.
    ///
    /// Categories that are unmapped or mapped to an empty list use the
    /// Neutral list; the result is empty only if that is missing too.
    pub fn songs_for(&self, category: MoodCategory) -> &[CuratedSong] {
        self.songs
            .get(&category)
            .filter(|songs| !songs.is_empty())
            .or_else(|| self.songs.get(&MoodCategory::Neutral))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
