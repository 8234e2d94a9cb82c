//! Terminal strategy: synthetic tracks straight from the curated library.

use async_trait::async_trait;

use super::sample::padded_indices;
use super::strategy::{ResolveContext, Strategy, TrackSet};
use super::PLAYLIST_SIZE;
use crate::catalog::TrackRecord;
use crate::library::{CuratedSong, MoodLibrary};
use crate::mood::MoodCategory;

/// Album art shown for tracks that were never resolved against the catalog
pub const PLACEHOLDER_ALBUM_ART: &str =
    "https://i.scdn.co/image/ab67616d0000b273c8b444df094279e70d0ed856";

const SEARCH_URL: &str = "https://open.spotify.com/search/";

/// Builds a synthetic record for the curated song at `position`.
pub fn fallback_track(category: MoodCategory, position: usize, song: &CuratedSong) -> TrackRecord {
    TrackRecord {
        title: song.title.to_string(),
        artist: song.artist.to_string(),
        uri: format!("fallback:{}:{position}", category.slug()),
        album_art: Some(PLACEHOLDER_ALBUM_ART.to_string()),
        external_url: format!("{SEARCH_URL}{}", urlencoding::encode(&song.query())),
    }
}

/// Samples the curated list without touching the catalog.
///
/// Lists shorter than a playlist are drawn again in further rounds; the
/// positional uris keep every record distinct.
pub struct CuratedFallback;

impl CuratedFallback {
    /// Always returns [`PLAYLIST_SIZE`] records unless the library is empty.
    pub fn build(&self, category: MoodCategory, library: &MoodLibrary) -> Vec<TrackRecord> {
        let songs = library.songs_for(category);

        padded_indices(songs.len(), PLAYLIST_SIZE)
            .into_iter()
            .enumerate()
            .map(|(position, i)| fallback_track(category, position, &songs[i]))
            .collect()
    }

    /// Fill a short catalog result up to [`PLAYLIST_SIZE`] with synthetic
    /// records, preferring curated songs not already in it.
    pub fn top_up(
        &self,
        tracks: Vec<TrackRecord>,
        category: MoodCategory,
        library: &MoodLibrary,
    ) -> Vec<TrackRecord> {
        let mut set = TrackSet::new(PLAYLIST_SIZE);
        for track in tracks {
            set.push(track);
        }
        if set.is_full() {
            return set.into_vec();
        }

        let songs = library.songs_for(category);
        let (fresh, repeats): (Vec<usize>, Vec<usize>) =
            padded_indices(songs.len(), PLAYLIST_SIZE)
                .into_iter()
                .partition(|&i| !set.contains_song(songs[i].title, songs[i].artist));

        for i in fresh.into_iter().chain(repeats) {
            if set.is_full() {
                break;
            }
            let position = set.len();
            set.push(fallback_track(category, position, &songs[i]));
        }

        set.into_vec()
    }
}

#[async_trait]
impl Strategy for CuratedFallback {
    fn name(&self) -> &'static str {
        "curated_fallback"
    }

    async fn attempt(&self, ctx: &ResolveContext<'_>) -> Option<Vec<TrackRecord>> {
        Some(self.build(ctx.mood.category, ctx.library))
    }
}
