//! Resolves the analyzer's song hints against the catalog.

use async_trait::async_trait;
use tracing::debug;

use super::strategy::{ResolveContext, Strategy, TrackSet};
use super::PLAYLIST_SIZE;
use crate::catalog::{format_track, TrackRecord};

/// Looks up each hint as `"{title} {artist}"` and keeps the first match.
pub struct HintStrategy;

#[async_trait]
impl Strategy for HintStrategy {
    fn name(&self) -> &'static str {
        "ai_hints"
    }

    async fn attempt(&self, ctx: &ResolveContext<'_>) -> Option<Vec<TrackRecord>> {
        if ctx.hints.is_empty() {
            return None;
        }

        let mut set = TrackSet::new(PLAYLIST_SIZE);
        for hint in ctx.hints.iter().take(PLAYLIST_SIZE) {
            if set.is_full() {
                break;
            }

            let query = hint.query();
            match ctx.catalog.search_track(&query, 1).await.first() {
                Some(raw) => {
                    if !set.push(format_track(raw)) {
                        debug!(%query, uri = %raw.uri, "Hint resolved to a duplicate track");
                    }
                }
                None => debug!(%query, "No catalog match for hint"),
            }
        }

        Some(set.into_vec())
    }
}
