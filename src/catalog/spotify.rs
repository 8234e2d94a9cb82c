//! Spotify Web API catalog client.
//!
//! Authenticates with the client-credentials flow and caches the access token
//! until shortly before it expires.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::dto::{ApiErrorResponse, RawTrack, SearchResponse, TokenResponse, TrackPage};
use super::{CatalogError, CatalogSearch};
use crate::config::CatalogConfig;

/// Tokens are refreshed this long before their reported expiry
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Largest page size the search endpoint accepts
const MAX_SEARCH_LIMIT: usize = 50;

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

pub struct SpotifyClient {
    client: Client,
    auth_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
    token: RwLock<Option<AccessToken>>,
}

impl SpotifyClient {
    /// Create a client against the public Spotify endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let defaults = CatalogConfig::default();
        Self::with_base_urls(
            client_id,
            client_secret,
            defaults.auth_url,
            defaults.api_url,
            Duration::from_secs(defaults.timeout_secs),
        )
    }

    /// Create a client with custom token and API endpoints.
    pub fn with_base_urls(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        auth_url: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.trim().is_empty() || client_secret.trim().is_empty() {
            return Err(CatalogError::MissingCredentials);
        }

        let client = Client::builder()
            .user_agent(concat!("groovi/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            client,
            auth_url: auth_url.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            client_id,
            client_secret,
            token: RwLock::new(None),
        })
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Self::with_base_urls(
            config.client_id.clone().unwrap_or_default(),
            config.client_secret.clone().unwrap_or_default(),
            &config.auth_url,
            &config.api_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Search tracks, surfacing provider errors.
    pub async fn try_search(&self, query: &str, limit: usize) -> Result<Vec<RawTrack>, CatalogError> {
        let token = self.access_token().await?;
        let limit = limit.clamp(1, MAX_SEARCH_LIMIT);
        let url = format!("{}/search", self.api_url);

        debug!(query, limit, "Searching catalog");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(&[("q", query), ("type", "track")])
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            *self.token.write().await = None;
            return Err(CatalogError::Auth("access token rejected".to_string()));
        }
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        let tracks: Vec<RawTrack> = body
            .tracks
            .map(TrackPage::into_tracks)
            .unwrap_or_default();

        Ok(tracks.into_iter().take(limit).collect())
    }

    /// Current access token, fetching a new one when missing or stale.
    async fn access_token(&self) -> Result<String, CatalogError> {
        if let Some(token) = self.token.read().await.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let mut guard = self.token.write().await;
        // Another request may have refreshed it while we waited for the lock
        if let Some(token) = guard.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = self.fetch_token().await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    async fn fetch_token(&self) -> Result<AccessToken, CatalogError> {
        debug!("Requesting catalog access token");

        let response = self
            .client
            .post(&self.auth_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Auth(body));
        }
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(AccessToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}

async fn error_from_response(response: reqwest::Response) -> CatalogError {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return CatalogError::RateLimited;
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    CatalogError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl CatalogSearch for SpotifyClient {
    async fn search_track(&self, query: &str, limit: usize) -> Vec<RawTrack> {
        match self.try_search(query, limit).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!(query, error = %e, "Catalog search failed");
                Vec::new()
            }
        }
    }
}
