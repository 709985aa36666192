//! Naver book-search client (Naver open API).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::providers::{NaverApi, ProviderError, ProviderKind, ValidationError};
use crate::utils::HttpClient;

const NAVER_API_BASE: &str = "https://openapi.naver.com";

/// Request parameters for the Naver book search API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaverSearchRequest {
    /// Search term (title, ISBN or author)
    pub keyword: String,

    /// Results per page, 1-100 (API default 10)
    #[serde(default = "default_display")]
    pub display: u32,

    /// First result offset, 1-1000 (API default 1)
    #[serde(default = "default_start")]
    pub start: u32,
}

fn default_display() -> u32 {
    10
}

fn default_start() -> u32 {
    1
}

impl NaverSearchRequest {
    /// Create a default request for a keyword.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            display: default_display(),
            start: default_start(),
        }
    }

    /// Set the page size.
    pub fn display(mut self, display: u32) -> Self {
        self.display = display;
        self
    }

    /// Set the result offset.
    pub fn start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Check the request against the API's documented bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.keyword.trim().is_empty() {
            return Err(ValidationError::BlankKeyword);
        }
        if !(1..=100).contains(&self.display) {
            return Err(ValidationError::DisplayOutOfRange(self.display));
        }
        if !(1..=1000).contains(&self.start) {
            return Err(ValidationError::StartOutOfRange(self.start));
        }
        Ok(())
    }
}

/// Naver search response in its native shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaverSearchResponse {
    #[serde(rename = "lastBuildDate", default)]
    pub last_build_date: String,

    /// Total hit count across all pages
    pub total: u64,

    #[serde(default)]
    pub start: u32,

    #[serde(default)]
    pub display: u32,

    #[serde(default)]
    pub items: Vec<NaverBook>,
}

/// A single book record as returned by Naver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaverBook {
    pub title: String,

    #[serde(default)]
    pub link: String,

    /// Cover thumbnail URL
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub author: String,

    // Naver omits price fields for out-of-print items
    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub discount: String,

    #[serde(default)]
    pub publisher: String,

    #[serde(default)]
    pub pubdate: String,

    #[serde(default)]
    pub isbn: String,

    #[serde(default)]
    pub description: String,
}

/// Naver book search client.
///
/// Authenticates with a client id/secret pair sent as request headers.
#[derive(Debug, Clone)]
pub struct NaverClient {
    client: Arc<Client>,
    client_id: String,
    client_secret: String,
    base_url: String,
}

impl NaverClient {
    /// Create a new client with its credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::with_base_url(client_id, client_secret, NAVER_API_BASE)
    }

    /// Create a client against a non-default endpoint (used by tests).
    pub fn with_base_url(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: HttpClient::new().into_inner(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: base_url.into(),
        }
    }

    /// Reuse an already-built HTTP client.
    pub fn from_client(
        client: &HttpClient,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client: client.clone_inner(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: NAVER_API_BASE.to_string(),
        }
    }
}

#[async_trait]
impl NaverApi for NaverClient {
    async fn search(
        &self,
        request: &NaverSearchRequest,
    ) -> Result<NaverSearchResponse, ProviderError> {
        request.validate()?;

        let url = format!("{}/v1/search/book.json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", request.keyword.as_str()),
                ("display", &request.display.to_string()),
                ("start", &request.start.to_string()),
            ])
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to call Naver: {}", e)))?;

        if !response.status().is_success() {
            return Err(ProviderError::Api {
                provider: ProviderKind::Naver,
                status: response.status().as_u16(),
            });
        }

        response
            .json::<NaverSearchResponse>()
            .await
            .map_err(|e| ProviderError::Parse(format!("Failed to parse Naver JSON: {}", e)))
    }
}
