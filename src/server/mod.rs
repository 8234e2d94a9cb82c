//! HTTP server setup and routing.

mod extractors;
mod recommend;
mod routes;
mod transcribe;

pub use extractors::{Payload, ResponseFormat};
pub use routes::Reply;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::catalog::SpotifyClient;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::library::MoodLibrary;
use crate::llm::{CompletionProvider, GroqClient};
use crate::mood::{MoodAnalyzer, VaderScorer};
use crate::playlist::PlaylistResolver;
use crate::transcribe::{DeepgramClient, Transcriber};

/// Room for multipart framing on top of the largest accepted upload
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub analyzer: Arc<MoodAnalyzer>,
    pub resolver: Arc<PlaylistResolver>,
    /// Speech-to-text provider, when configured
    pub transcriber: Option<Arc<dyn Transcriber>>,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, analyzer: MoodAnalyzer, resolver: PlaylistResolver) -> Self {
        Self {
            config: Arc::new(config),
            analyzer: Arc::new(analyzer),
            resolver: Arc::new(resolver),
            transcriber: None,
            started_at: Instant::now(),
        }
    }

    /// Set the speech-to-text provider
    pub fn with_transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    /// Build the state with real provider clients.
    ///
    /// Fails when the configuration is invalid or the catalog client cannot
    /// be built; missing AI or transcription keys only disable those paths.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        config.validate()?;

        let provider: Option<Arc<dyn CompletionProvider>> = GroqClient::from_config(&config.ai)
            .map_err(|e| AppError::Internal(format!("Failed to build AI client: {e}")))?
            .map(|client| Arc::new(client) as Arc<dyn CompletionProvider>);
        match &provider {
            Some(p) => info!(provider = p.name(), model = p.model(), "AI mood analysis enabled"),
            None => warn!("No AI API key configured, using VADER scorer only"),
        }
        let analyzer = MoodAnalyzer::new(provider, Arc::new(VaderScorer::new()));

        let catalog = SpotifyClient::from_config(&config.catalog)
            .map_err(|e| AppError::Internal(format!("Failed to build catalog client: {e}")))?;
        let resolver = PlaylistResolver::new(Arc::new(catalog), Arc::new(MoodLibrary::builtin()));

        let transcriber = DeepgramClient::from_config(&config.transcription)
            .map_err(|e| AppError::Internal(format!("Failed to build transcription client: {e}")))?;

        let mut state = Self::new(config, analyzer, resolver);
        match transcriber {
            Some(client) => {
                info!(provider = client.name(), "Transcription enabled");
                state = state.with_transcriber(Arc::new(client));
            }
            None => warn!("No transcription API key configured, /transcribe is disabled"),
        }

        Ok(state)
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// CORS policy for the configured frontend origins
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT, AUTHORIZATION])
}

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.transcription.max_upload_bytes + BODY_LIMIT_SLACK;
    let cors = cors_layer(&state.config.server.allowed_origins);

    Router::new()
        .route("/", get(routes::health))
        .route("/health", get(routes::health))
        .route("/recommend", post(recommend::recommend))
        .route("/transcribe", post(transcribe::transcribe))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
