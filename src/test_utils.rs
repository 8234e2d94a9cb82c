//! Test utilities and fakes for the provider traits.
//!
//! Provider clients are exercised against [`spawn_stub`], a throwaway axum
//! server on an ephemeral port. Everything above the clients uses the fakes.

use async_trait::async_trait;
use axum::Router;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::catalog::dto::{RawAlbum, RawArtist, RawImage};
use crate::catalog::{CatalogSearch, RawTrack};
use crate::llm::{CompletionProvider, LlmError};

/// Serve `app` on a random local port and return its base URL.
pub async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Stub listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server failed");
    });

    format!("http://{addr}")
}

/// Completion provider with a canned reply, or a canned failure.
pub struct FakeCompletion {
    reply: Option<String>,
}

impl FakeCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl CompletionProvider for FakeCompletion {
    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        self.reply
            .clone()
            .ok_or_else(|| LlmError::Connection("connection refused".to_string()))
    }
}

/// Builds a raw catalog match with artwork and a Spotify link.
pub fn raw_track(name: &str, artist: &str, uri: &str) -> RawTrack {
    RawTrack {
        name: name.to_string(),
        artists: vec![RawArtist {
            name: artist.to_string(),
        }],
        uri: uri.to_string(),
        album: Some(RawAlbum {
            images: vec![RawImage {
                url: format!("https://img.test/{uri}"),
                height: Some(640),
                width: Some(640),
            }],
        }),
        external_urls: HashMap::from([(
            "spotify".to_string(),
            format!("https://open.spotify.com/track/{uri}"),
        )]),
    }
}

/// In-memory catalog.
///
/// Answers configured queries exactly; when built with [`FakeCatalog::echo`]
/// every other query gets `limit` tracks whose uris are derived from it.
#[derive(Default)]
pub struct FakeCatalog {
    matches: HashMap<String, Vec<RawTrack>>,
    echo: bool,
    calls: Mutex<Vec<(String, usize)>>,
}

impl FakeCatalog {
    /// Catalog that never finds anything
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog that finds something for every query
    pub fn echo() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    pub fn with_match(mut self, query: &str, tracks: Vec<RawTrack>) -> Self {
        self.matches.insert(query.to_string(), tracks);
        self
    }

    /// Queries seen so far, with their limits
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSearch for FakeCatalog {
    async fn search_track(&self, query: &str, limit: usize) -> Vec<RawTrack> {
        self.calls.lock().unwrap().push((query.to_string(), limit));

        if let Some(tracks) = self.matches.get(query) {
            return tracks.iter().take(limit).cloned().collect();
        }
        if !self.echo {
            return Vec::new();
        }

        (0..limit)
            .map(|i| raw_track(query, "Echo", &format!("fake:{query}:{i}")))
            .collect()
    }
}
