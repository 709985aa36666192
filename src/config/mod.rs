//! Configuration management.
//!
//! Provider credentials are injected once at startup and treated as
//! immutable for the process lifetime. Values come from a config file
//! (TOML), overlaid with `BOOKSCOUT_`-prefixed environment variables;
//! the defaults fall back to the conventional per-provider env vars.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Credentials for the three book-search providers
    #[serde(default)]
    pub credentials: ProviderCredentials,

    /// Outbound HTTP settings
    #[serde(default)]
    pub http: HttpConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// API credentials for the external providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCredentials {
    /// Aladin TTB key
    #[serde(default)]
    pub aladin_ttb_key: String,

    /// Kakao REST API key
    #[serde(default)]
    pub kakao_rest_api_key: String,

    /// Naver application client id
    #[serde(default)]
    pub naver_client_id: String,

    /// Naver application client secret
    #[serde(default)]
    pub naver_client_secret: String,
}

impl Default for ProviderCredentials {
    fn default() -> Self {
        Self {
            aladin_ttb_key: std::env::var("ALADIN_TTB_KEY").unwrap_or_default(),
            kakao_rest_api_key: std::env::var("KAKAO_REST_API_KEY").unwrap_or_default(),
            naver_client_id: std::env::var("NAVER_CLIENT_ID").unwrap_or_default(),
            naver_client_secret: std::env::var("NAVER_CLIENT_SECRET").unwrap_or_default(),
        }
    }
}

/// Outbound HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout per outbound call (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Deadline per provider task inside an aggregate search (seconds)
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            provider_timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_provider_timeout() -> u64 {
    10
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server binds to
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// Load configuration from a file, overlaid with environment variables
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("BOOKSCOUT"))
        .build()?;

    settings.try_deserialize()
}

/// Get the default configuration (from env vars or defaults)
pub fn get_config() -> Config {
    Config::default()
}
