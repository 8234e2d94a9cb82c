//! Shared types for the Groovi HTTP API.
//!
//! Request and response bodies live in [`api`]; service-level status types
//! are defined here.

pub mod api;

use serde::{Deserialize, Serialize};

pub use api::*;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub status: HealthStatus,
    pub version: String,
    pub uptime_secs: u64,
    pub providers: ProviderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Which optional providers are configured
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderStatus {
    /// Completion provider for mood analysis; the VADER scorer is used otherwise
    pub ai_analysis: bool,
    /// Speech-to-text provider backing `/transcribe`
    pub transcription: bool,
}
