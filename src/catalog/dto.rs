//! Spotify Web API response types.
//!
//! Only the fields the service reads are modeled; everything else in the
//! payloads is ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response from `GET /v1/search?type=track`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
pub struct TrackPage {
    /// Raw entries; Spotify sends `null` here at times
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

impl TrackPage {
    /// Matches that parse as tracks, in page order
    pub fn into_tracks(self) -> Vec<RawTrack> {
        self.items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()
    }
}

/// A track match as returned by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<RawArtist>,
    pub uri: String,
    #[serde(default)]
    pub album: Option<RawAlbum>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArtist {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAlbum {
    #[serde(default)]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawImage {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// Response from the client-credentials token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Error body returned by the Web API
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: String,
}
