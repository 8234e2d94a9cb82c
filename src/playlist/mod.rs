//! Playlist resolution.
//!
//! [`PlaylistResolver`] turns a mood record and optional song hints into a
//! five-track playlist by walking an ordered chain of [`Strategy`]s:
//!
//! 1. [`HintStrategy`]: the analyzer's hints, looked up in the catalog
//! 2. [`LibraryStrategy`]: curated songs for the mood, looked up and backfilled
//! 3. [`CuratedFallback`]: synthetic records from the curated list
//!
//! A strategy's result is kept only if it holds at least
//! [`MIN_ACCEPTABLE_TRACKS`] tracks; otherwise the next one runs. A kept result
//! that is still short is topped up with curated fallback records. The last
//! step never touches the network.

mod fallback;
mod hints;
mod library;
mod sample;
mod strategy;

pub use fallback::{fallback_track, CuratedFallback, PLACEHOLDER_ALBUM_ART};
pub use hints::HintStrategy;
pub use library::{LibraryStrategy, BACKFILL_LIMIT, LIBRARY_SAMPLE_SIZE};
pub use strategy::{ResolveContext, Strategy, TrackSet};

use std::sync::Arc;
use tracing::{debug, info};

use crate::catalog::{CatalogSearch, TrackRecord};
use crate::library::MoodLibrary;
use crate::mood::{MoodRecord, SongHint};

/// Number of tracks in a playlist
pub const PLAYLIST_SIZE: usize = 5;

/// Fewest tracks a catalog-backed strategy must produce to be accepted
pub const MIN_ACCEPTABLE_TRACKS: usize = 3;

pub struct PlaylistResolver {
    catalog: Arc<dyn CatalogSearch>,
    library: Arc<MoodLibrary>,
    strategies: Vec<Box<dyn Strategy>>,
    fallback: CuratedFallback,
}

impl PlaylistResolver {
    /// Resolver with the standard strategy chain.
    pub fn new(catalog: Arc<dyn CatalogSearch>, library: Arc<MoodLibrary>) -> Self {
        Self::with_strategies(
            catalog,
            library,
            vec![Box::new(HintStrategy), Box::new(LibraryStrategy)],
        )
    }

    /// Resolver with a custom chain; [`CuratedFallback`] always runs last.
    pub fn with_strategies(
        catalog: Arc<dyn CatalogSearch>,
        library: Arc<MoodLibrary>,
        strategies: Vec<Box<dyn Strategy>>,
    ) -> Self {
        Self {
            catalog,
            library,
            strategies,
            fallback: CuratedFallback,
        }
    }

    /// Resolve a playlist for `mood`.
    ///
    /// Returns [`PLAYLIST_SIZE`] tracks with distinct uris. The result is
    /// empty only when the curated library has nothing for the mood.
    pub async fn recommend(&self, mood: &MoodRecord, hints: &[SongHint]) -> Vec<TrackRecord> {
        let ctx = ResolveContext {
            mood,
            hints,
            catalog: self.catalog.as_ref(),
            library: &self.library,
        };

        for strategy in &self.strategies {
            match strategy.attempt(&ctx).await {
                Some(tracks) if tracks.len() >= MIN_ACCEPTABLE_TRACKS => {
                    info!(
                        strategy = strategy.name(),
                        category = %mood.category,
                        tracks = tracks.len(),
                        "Playlist resolved"
                    );
                    return self.fallback.top_up(tracks, mood.category, &self.library);
                }
                Some(tracks) => {
                    info!(
                        strategy = strategy.name(),
                        tracks = tracks.len(),
                        needed = MIN_ACCEPTABLE_TRACKS,
                        "Strategy came up short, trying next"
                    );
                }
                None => debug!(strategy = strategy.name(), "Strategy not applicable"),
            }
        }

        let tracks = self.fallback.attempt(&ctx).await.unwrap_or_default();
        info!(
            strategy = self.fallback.name(),
            category = %mood.category,
            tracks = tracks.len(),
            "Playlist resolved from curated fallback"
        );
        tracks
    }
}
