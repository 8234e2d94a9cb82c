//! The strategy seam of the resolver.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::catalog::{CatalogSearch, TrackRecord};
use crate::library::MoodLibrary;
use crate::mood::{MoodRecord, SongHint};

/// Everything a strategy may read while resolving one request
pub struct ResolveContext<'a> {
    pub mood: &'a MoodRecord,
    pub hints: &'a [SongHint],
    pub catalog: &'a dyn CatalogSearch,
    pub library: &'a MoodLibrary,
}

/// One way of sourcing a playlist.
///
/// `attempt` returns `None` when the strategy does not apply to the request
/// (for example, no hints to resolve). A returned list holds at most
/// [`super::PLAYLIST_SIZE`] tracks with distinct uris; the resolver decides
/// whether it is long enough to keep.
#[async_trait]
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(&self, ctx: &ResolveContext<'_>) -> Option<Vec<TrackRecord>>;
}

/// Insertion-ordered track list that rejects repeated uris and stops growing
/// at its capacity.
#[derive(Debug)]
pub struct TrackSet {
    tracks: Vec<TrackRecord>,
    uris: HashSet<String>,
    capacity: usize,
}

impl TrackSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            tracks: Vec::with_capacity(capacity),
            uris: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a track; returns `false` if it was a duplicate or the set is full.
    pub fn push(&mut self, track: TrackRecord) -> bool {
        if self.is_full() || !self.uris.insert(track.uri.clone()) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Whether a track with this title and artist is already present
    pub fn contains_song(&self, title: &str, artist: &str) -> bool {
        self.tracks.iter().any(|t| {
            t.title.eq_ignore_ascii_case(title) && t.artist.eq_ignore_ascii_case(artist)
        })
    }

    pub fn is_full(&self) -> bool {
        self.tracks.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn into_vec(self) -> Vec<TrackRecord> {
        self.tracks
    }
}
