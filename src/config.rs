use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the `GROOVI_` prefix.
/// For example: `GROOVI_SERVER__PORT=8000`, `GROOVI_AI__API_KEY=gsk_...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Mood analysis model configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Music catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Speech-to-text configuration
    #[serde(default)]
    pub transcription: TranscriptionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Frontend origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Longest accepted mood text, in characters
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
            max_text_length: default_max_text_length(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

fn default_max_text_length() -> usize {
    1000
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Message(format!("Invalid socket address: {e}")))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key for the completion provider; analysis falls back to the
    /// VADER scorer when unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,

    #[serde(default = "default_ai_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_ai_base_url(),
            model: default_ai_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_ai_timeout(),
        }
    }
}

fn default_ai_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_ai_model() -> String {
    "meta-llama/llama-4-maverick-17b-128e-instruct".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.7
}

fn default_ai_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Spotify client ID (required)
    #[serde(default)]
    pub client_id: Option<String>,

    /// Spotify client secret (required)
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Client-credentials token endpoint
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// Web API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_catalog_timeout")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            auth_url: default_auth_url(),
            api_url: default_api_url(),
            timeout_secs: default_catalog_timeout(),
        }
    }
}

fn default_auth_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_api_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_catalog_timeout() -> u64 {
    10
}

impl CatalogConfig {
    fn has_credentials(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.client_id) && present(&self.client_secret)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionConfig {
    /// Deepgram API key; `/transcribe` answers 503 when unset
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_transcription_base_url")]
    pub base_url: String,

    #[serde(default = "default_transcription_model")]
    pub model: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Largest accepted upload, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    #[serde(default = "default_transcription_timeout")]
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_transcription_base_url(),
            model: default_transcription_model(),
            language: default_language(),
            max_upload_bytes: default_max_upload_bytes(),
            timeout_secs: default_transcription_timeout(),
        }
    }
}

fn default_transcription_base_url() -> String {
    "https://api.deepgram.com/v1".to_string()
}

fn default_transcription_model() -> String {
    "nova-2".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_transcription_timeout() -> u64 {
    60
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables should be prefixed with `GROOVI_` and use
    /// double underscores for nested values:
    /// - `GROOVI_SERVER__PORT` -> server.port
    /// - `GROOVI_SERVER__ALLOWED_ORIGINS` -> server.allowed_origins (comma separated)
    /// - `GROOVI_CATALOG__CLIENT_ID` -> catalog.client_id
    /// - `GROOVI_AI__API_KEY` -> ai.api_key
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("GROOVI")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Check settings the service cannot start without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.catalog.has_credentials() {
            return Err(ConfigError::Message(
                "Catalog credentials missing: set GROOVI_CATALOG__CLIENT_ID and GROOVI_CATALOG__CLIENT_SECRET"
                    .to_string(),
            ));
        }
        if self.server.max_text_length == 0 {
            return Err(ConfigError::Message(
                "server.max_text_length must be at least 1".to_string(),
            ));
        }
        self.server.socket_addr()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_credentials() -> AppConfig {
        AppConfig {
            catalog: CatalogConfig {
                client_id: Some("id".to_string()),
                client_secret: Some("secret".to_string()),
                ..CatalogConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_text_length, 1000);
        assert_eq!(config.server.allowed_origins.len(), 3);
        assert!(config.ai.api_key.is_none());
        assert_eq!(config.ai.max_tokens, 2048);
        assert_eq!(config.catalog.api_url, "https://api.spotify.com/v1");
        assert_eq!(config.transcription.model, "nova-2");
        assert_eq!(config.transcription.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig::default();
        let addr = server.socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);

        let bad = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(bad.socket_addr().is_err());
    }

    #[test]
    fn test_validate_requires_catalog_credentials() {
        assert!(AppConfig::default().validate().is_err());

        let blank = AppConfig {
            catalog: CatalogConfig {
                client_id: Some("id".to_string()),
                client_secret: Some("  ".to_string()),
                ..CatalogConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(blank.validate().is_err());

        assert!(with_credentials().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_text_length() {
        let mut config = with_credentials();
        config.server.max_text_length = 0;
        assert!(config.validate().is_err());
    }
}
