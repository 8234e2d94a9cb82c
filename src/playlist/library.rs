//! Resolves curated library entries against the catalog, backfilling from a
//! broader search term when the exact lookups come up short.

use async_trait::async_trait;
use tracing::debug;

use super::sample::{pick_index, sample_indices};
use super::strategy::{ResolveContext, Strategy, TrackSet};
use super::PLAYLIST_SIZE;
use crate::catalog::{format_track, TrackRecord};
use crate::library::CuratedSong;

/// Curated entries looked up exactly, per request
pub const LIBRARY_SAMPLE_SIZE: usize = 3;

/// Page size for the backfill search
pub const BACKFILL_LIMIT: usize = 10;

pub struct LibraryStrategy;

/// Queries chosen up front, so no RNG is held across awaits
struct LibraryPlan {
    lookups: Vec<String>,
    backfill: Option<String>,
}

impl LibraryPlan {
    fn draw(songs: &[CuratedSong], fallback_term: &str) -> Self {
        let sampled: Vec<&CuratedSong> = sample_indices(songs.len(), LIBRARY_SAMPLE_SIZE)
            .into_iter()
            .map(|i| &songs[i])
            .collect();

        let backfill = pick_index(sampled.len()).map(|i| {
            let terms = sampled[i].search_terms;
            pick_index(terms.len())
                .map(|t| terms[t].to_string())
                .unwrap_or_else(|| fallback_term.to_string())
        });

        Self {
            lookups: sampled.iter().map(|song| song.query()).collect(),
            backfill,
        }
    }
}

#[async_trait]
impl Strategy for LibraryStrategy {
    fn name(&self) -> &'static str {
        "curated_catalog"
    }

    async fn attempt(&self, ctx: &ResolveContext<'_>) -> Option<Vec<TrackRecord>> {
        let songs = ctx.library.songs_for(ctx.mood.category);
        if songs.is_empty() {
            return None;
        }

        let plan = LibraryPlan::draw(songs, &ctx.mood.category.label().to_lowercase());
        let mut set = TrackSet::new(PLAYLIST_SIZE);

        for query in &plan.lookups {
            if let Some(raw) = ctx.catalog.search_track(query, 1).await.first() {
                set.push(format_track(raw));
            } else {
                debug!(%query, "No catalog match for curated song");
            }
        }

        if !set.is_full() {
            if let Some(term) = &plan.backfill {
                debug!(%term, have = set.len(), "Backfilling from search term");
                for raw in ctx.catalog.search_track(term, BACKFILL_LIMIT).await {
                    if set.is_full() {
                        break;
                    }
                    set.push(format_track(&raw));
                }
            }
        }

        Some(set.into_vec())
    }
}
