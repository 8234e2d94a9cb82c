//! HTTP route handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::types::{HealthResponse, HealthStatus, ProviderStatus};

use super::extractors::ResponseFormat;
use super::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Response body encoded as JSON or `MessagePack`
pub struct Reply<T> {
    pub format: ResponseFormat,
    pub body: T,
}

impl<T> Reply<T> {
    pub fn new(format: ResponseFormat, body: T) -> Self {
        Self { format, body }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        match self.format {
            ResponseFormat::Json => Json(self.body).into_response(),
            ResponseFormat::MsgPack => match rmp_serde::to_vec_named(&self.body) {
                Ok(bytes) => (
                    StatusCode::OK,
                    [("content-type", "application/msgpack")],
                    bytes,
                )
                    .into_response(),
                Err(e) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to serialize response: {e}"),
                )
                    .into_response(),
            },
        }
    }
}

/// Health check endpoint
///
/// GET / and GET /health
pub async fn health(State(state): State<AppState>, format: ResponseFormat) -> Reply<HealthResponse> {
    let providers = ProviderStatus {
        ai_analysis: state.analyzer.has_provider(),
        transcription: state.transcriber.is_some(),
    };

    // Degraded while running on the VADER scorer alone
    let status = if providers.ai_analysis {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    Reply::new(
        format,
        HealthResponse {
            message: "Groovi API is running!".to_string(),
            status,
            version: VERSION.to_string(),
            uptime_secs: state.uptime_seconds(),
            providers,
        },
    )
}
