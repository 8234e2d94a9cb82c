//! Integration tests for API endpoints.
//!
//! These tests drive the full router with in-process fakes standing in for
//! the completion, catalog and transcription providers.

use async_trait::async_trait;
use axum::http::{header::ACCEPT, HeaderValue, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use bytes::Bytes;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use groovi::catalog::dto::RawTrack;
use groovi::catalog::CatalogSearch;
use groovi::config::AppConfig;
use groovi::library::MoodLibrary;
use groovi::llm::{CompletionProvider, LlmError};
use groovi::mood::{MoodAnalyzer, VaderScorer};
use groovi::playlist::PlaylistResolver;
use groovi::server::{create_router, AppState};
use groovi::transcribe::{TranscribeError, Transcriber};
use groovi::types::{HealthResponse, RecommendResponse, TranscriptionResponse};

/// Catalog that finds one track per query, or nothing at all
struct StubCatalog {
    finds: bool,
}

#[async_trait]
impl CatalogSearch for StubCatalog {
    async fn search_track(&self, query: &str, limit: usize) -> Vec<RawTrack> {
        if !self.finds {
            return Vec::new();
        }
        (0..limit)
            .map(|i| RawTrack {
                name: query.to_string(),
                artists: vec![],
                uri: format!("spotify:track:{query}:{i}"),
                album: None,
                external_urls: HashMap::new(),
            })
            .collect()
    }
}

struct StubCompletion(&'static str);

#[async_trait]
impl CompletionProvider for StubCompletion {
    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Ok(self.0.to_string())
    }
}

struct StubTranscriber;

#[async_trait]
impl Transcriber for StubTranscriber {
    fn name(&self) -> &str {
        "stub"
    }

    async fn transcribe(&self, audio: Bytes, _content_type: &str) -> Result<String, TranscribeError> {
        match &audio[..] {
            b"quiet" => Err(TranscribeError::NoSpeech),
            b"broken" => Err(TranscribeError::Api {
                status: 500,
                message: "upstream down".to_string(),
            }),
            _ => Ok("I feel great today".to_string()),
        }
    }
}

fn state(catalog_finds: bool, completion: Option<&'static str>) -> AppState {
    let provider = completion.map(|reply| Arc::new(StubCompletion(reply)) as Arc<dyn CompletionProvider>);
    let analyzer = MoodAnalyzer::new(provider, Arc::new(VaderScorer::new()));
    let resolver = PlaylistResolver::new(
        Arc::new(StubCatalog {
            finds: catalog_finds,
        }),
        Arc::new(MoodLibrary::builtin()),
    );
    AppState::new(AppConfig::default(), analyzer, resolver)
}

/// Create a test server with an empty catalog and no AI provider
fn create_test_server() -> TestServer {
    TestServer::new(create_router(state(false, None))).unwrap()
}

fn audio_form(bytes: &'static [u8], mime: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "audio",
        Part::bytes(bytes.to_vec())
            .file_name("mood.webm")
            .mime_type(mime),
    )
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    for path in ["/", "/health"] {
        let response = server.get(path).await;
        response.assert_status_ok();

        let health: HealthResponse = response.json();
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
        assert!(!health.providers.ai_analysis);
        assert!(!health.providers.transcription);
    }
}

#[tokio::test]
async fn test_health_msgpack() {
    let server = create_test_server();

    let response = server
        .get("/health")
        .add_header(ACCEPT, HeaderValue::from_static("application/msgpack"))
        .await;

    response.assert_status_ok();
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("msgpack"));
    let health: HealthResponse = rmp_serde::from_slice(response.as_bytes()).unwrap();
    assert_eq!(health.message, "Groovi API is running!");
}

#[tokio::test]
async fn test_recommend_deterministic_fallback() {
    let server = create_test_server();

    let response = server
        .post("/recommend")
        .json(&json!({"text": "I just got a promotion and I'm so excited!"}))
        .await;

    response.assert_status_ok();
    let body: RecommendResponse = response.json();
    assert_eq!(body.mood_analysis.category.label(), "Positive");
    assert_eq!(body.mood_analysis.intensity, "moderate");
    assert_eq!(body.songs.len(), 5);

    let uris: Vec<_> = body.songs.iter().map(|s| s.uri.as_str()).collect();
    assert_eq!(
        uris,
        vec![
            "fallback:positive:0",
            "fallback:positive:1",
            "fallback:positive:2",
            "fallback:positive:3",
            "fallback:positive:4",
        ]
    );
}

#[tokio::test]
async fn test_recommend_response_shape() {
    let server = create_test_server();

    let response = server
        .post("/recommend")
        .json(&json!({"text": "The weather is okay"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let mood = &body["mood_analysis"];
    for key in ["category", "description", "summary", "score", "intensity"] {
        assert!(mood.get(key).is_some(), "missing {key}");
    }
    let song = &body["songs"][0];
    for key in ["title", "artist", "uri", "album_art", "external_url"] {
        assert!(song.get(key).is_some(), "missing {key}");
    }
}

#[tokio::test]
async fn test_recommend_with_ai_hints() {
    let reply = r#"{
        "mood_analysis": {"score": 0.8, "category": "Very Positive", "intensity": "very intense", "summary": "Pure joy!"},
        "song_recommendations": [
            {"title": "Happy", "artist": "Pharrell Williams"},
            {"title": "Uptown Funk", "artist": "Bruno Mars"},
            {"title": "Shout", "artist": "Isley Brothers"},
            {"title": "September", "artist": "Earth, Wind & Fire"},
            {"title": "Dancing Queen", "artist": "ABBA"}
        ]
    }"#;
    let server = TestServer::new(create_router(state(true, Some(reply)))).unwrap();

    let response = server
        .post("/recommend")
        .json(&json!({"text": "Best day ever"}))
        .await;

    response.assert_status_ok();
    let body: RecommendResponse = response.json();
    assert_eq!(body.mood_analysis.summary, "Pure joy!");
    assert_eq!(body.mood_analysis.intensity, "very intense");
    let titles: Vec<_> = body.songs.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Happy Pharrell Williams",
            "Uptown Funk Bruno Mars",
            "Shout Isley Brothers",
            "September Earth, Wind & Fire",
            "Dancing Queen ABBA",
        ]
    );
    assert!(body.songs.iter().all(|s| s.artist == "Unknown Artist"));
}

#[tokio::test]
async fn test_recommend_with_catalog_uses_library() {
    let server = TestServer::new(create_router(state(true, None))).unwrap();

    let response = server
        .post("/recommend")
        .json(&json!({"text": "I feel terrible and hopeless"}))
        .await;

    response.assert_status_ok();
    let body: RecommendResponse = response.json();
    assert_eq!(body.mood_analysis.category.label(), "Very Negative");
    assert_eq!(body.songs.len(), 5);

    let uris: HashSet<_> = body.songs.iter().map(|s| s.uri.clone()).collect();
    assert_eq!(uris.len(), 5);
    assert!(body.songs.iter().all(|s| s.uri.starts_with("spotify:track:")));
}

#[tokio::test]
async fn test_recommend_msgpack_request() {
    let server = create_test_server();

    let body = rmp_serde::to_vec_named(&json!({"text": "I am happy"})).unwrap();
    let response = server
        .post("/recommend")
        .content_type("application/msgpack")
        .bytes(Bytes::from(body))
        .await;

    response.assert_status_ok();
    let body: RecommendResponse = response.json();
    assert_eq!(body.songs.len(), 5);
}

#[tokio::test]
async fn test_recommend_rejects_bad_text() {
    let server = create_test_server();

    for payload in [json!({}), json!({"text": ""}), json!({"text": "   "})] {
        let response = server.post("/recommend").json(&payload).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    let long = "a".repeat(1001);
    let response = server.post("/recommend").json(&json!({"text": long})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_malformed_body() {
    let server = create_test_server();

    let response = server
        .post("/recommend")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"text\":"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_empty_library_is_not_found() {
    let analyzer = MoodAnalyzer::deterministic();
    let resolver = PlaylistResolver::new(
        Arc::new(StubCatalog { finds: false }),
        Arc::new(MoodLibrary::default()),
    );
    let state = AppState::new(AppConfig::default(), analyzer, resolver);
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server
        .post("/recommend")
        .json(&json!({"text": "hello"}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_transcribe_without_provider() {
    let server = create_test_server();

    let response = server
        .post("/transcribe")
        .multipart(audio_form(b"speech", "audio/webm"))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_transcribe_endpoint() {
    let state = state(false, None).with_transcriber(Arc::new(StubTranscriber));
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server
        .post("/transcribe")
        .multipart(audio_form(b"0123456789abcdef", "audio/webm"))
        .await;

    response.assert_status_ok();
    let body: TranscriptionResponse = response.json();
    assert_eq!(body.transcript, "I feel great today");
    assert_eq!(body.filename, "mood.webm");
    assert_eq!(body.duration_estimate, 16.0 / 32000.0);
}

#[tokio::test]
async fn test_transcribe_errors() {
    let state = state(false, None).with_transcriber(Arc::new(StubTranscriber));
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server
        .post("/transcribe")
        .multipart(audio_form(b"speech", "audio/flac"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/transcribe")
        .multipart(audio_form(b"quiet", "audio/wav"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/transcribe")
        .multipart(audio_form(b"broken", "audio/ogg"))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);

    let response = server
        .post("/transcribe")
        .multipart(MultipartForm::new().add_text("note", "no audio here"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_transcribe_rejects_large_upload() {
    let mut config = AppConfig::default();
    config.transcription.max_upload_bytes = 8;
    let state = AppState::new(
        config,
        MoodAnalyzer::deterministic(),
        PlaylistResolver::new(
            Arc::new(StubCatalog { finds: false }),
            Arc::new(MoodLibrary::builtin()),
        ),
    )
    .with_transcriber(Arc::new(StubTranscriber));
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server
        .post("/transcribe")
        .multipart(audio_form(b"0123456789", "audio/mpeg"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
