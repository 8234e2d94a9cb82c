//! Music catalog search.
//!
//! The resolver talks to the catalog through [`CatalogSearch`], whose
//! `search_track` never fails: provider errors are logged inside the
//! implementation and surface as an empty result.

pub mod dto;
mod spotify;

pub use dto::RawTrack;
pub use spotify::SpotifyClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type for catalog provider calls
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited by catalog provider")]
    RateLimited,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Missing catalog credentials")]
    MissingCredentials,
}

/// A resolved song, ready to be returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackRecord {
    pub title: String,
    pub artist: String,
    /// Identity key within a playlist
    pub uri: String,
    pub album_art: Option<String>,
    pub external_url: String,
}

/// Track search against a music catalog
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Search tracks matching `query`, returning at most `limit` matches.
    ///
    /// Provider failures yield an empty list.
    async fn search_track(&self, query: &str, limit: usize) -> Vec<RawTrack>;
}

/// Artist name used when a match lists no artists
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Normalize a raw catalog match into a [`TrackRecord`].
///
/// Uses the first listed artist and the first album image, if any.
pub fn format_track(raw: &RawTrack) -> TrackRecord {
    let artist = raw
        .artists
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    let album_art = raw
        .album
        .as_ref()
        .and_then(|album| album.images.first())
        .map(|image| image.url.clone());

    let external_url = raw
        .external_urls
        .get("spotify")
        .cloned()
        .or_else(|| track_url_from_uri(&raw.uri))
        .unwrap_or_default();

    TrackRecord {
        title: raw.name.clone(),
        artist,
        uri: raw.uri.clone(),
        album_art,
        external_url,
    }
}

/// `spotify:track:<id>` -> `https://open.spotify.com/track/<id>`
fn track_url_from_uri(uri: &str) -> Option<String> {
    uri.strip_prefix("spotify:track:")
        .filter(|id| !id.is_empty())
        .map(|id| format!("https://open.spotify.com/track/{id}"))
}

#[cfg(test)]
mod tests {
    use super::dto::{RawAlbum, RawArtist, RawImage};
    use super::*;
    use std::collections::HashMap;

    fn raw_track() -> RawTrack {
        RawTrack {
            name: "Under Pressure".to_string(),
            artists: vec![
                RawArtist {
                    name: "Queen".to_string(),
                },
                RawArtist {
                    name: "David Bowie".to_string(),
                },
            ],
            uri: "spotify:track:abc123".to_string(),
            album: Some(RawAlbum {
                images: vec![
                    RawImage {
                        url: "https://img/large".to_string(),
                        height: Some(640),
                        width: Some(640),
                    },
                    RawImage {
                        url: "https://img/small".to_string(),
                        height: Some(64),
                        width: Some(64),
                    },
                ],
            }),
            external_urls: HashMap::from([(
                "spotify".to_string(),
                "https://open.spotify.com/track/abc123".to_string(),
            )]),
        }
    }

    #[test]
    fn test_format_track_picks_first_artist_and_image() {
        let record = format_track(&raw_track());
        assert_eq!(record.title, "Under Pressure");
        assert_eq!(record.artist, "Queen");
        assert_eq!(record.uri, "spotify:track:abc123");
        assert_eq!(record.album_art.as_deref(), Some("https://img/large"));
        assert_eq!(record.external_url, "https://open.spotify.com/track/abc123");
    }

    #[test]
    fn test_format_track_without_artwork() {
        let mut raw = raw_track();
        raw.album = Some(RawAlbum { images: vec![] });
        assert_eq!(format_track(&raw).album_art, None);

        raw.album = None;
        assert_eq!(format_track(&raw).album_art, None);
    }

    #[test]
    fn test_format_track_without_artists_or_urls() {
        let mut raw = raw_track();
        raw.artists.clear();
        raw.external_urls.clear();

        let record = format_track(&raw);
        assert_eq!(record.artist, UNKNOWN_ARTIST);
        assert_eq!(record.external_url, "https://open.spotify.com/track/abc123");
    }

    #[test]
    fn test_format_track_is_idempotent() {
        let raw = raw_track();
        assert_eq!(format_track(&raw), format_track(&raw));
    }

    #[test]
    fn test_track_url_from_uri() {
        assert_eq!(track_url_from_uri("spotify:track:"), None);
        assert_eq!(track_url_from_uri("spotify:album:xyz"), None);
    }
}
