//! Book-search provider clients.
//!
//! Each provider (Aladin, Kakao, Naver) gets its own module with its own
//! request/response types: the three upstream APIs disagree on field names,
//! paging parameters and even where the total-count lives, so the schemas are
//! kept in their native shapes and mapped explicitly instead of being forced
//! under a shared supertype.
//!
//! Every client performs exactly one network round-trip per call and fails
//! with a [`ProviderError`] on network errors, non-success upstream statuses
//! or payload-parse failures. Retry policy, if any, belongs to the caller.
//! Clients are stateless aside from their immutable credentials and can be
//! invoked concurrently.

pub mod aladin;
pub mod kakao;
pub mod mock;
pub mod naver;

pub use aladin::{AladinBook, AladinClient, AladinSearchRequest, AladinSearchResponse};
pub use kakao::{KakaoClient, KakaoDocument, KakaoMeta, KakaoSearchRequest, KakaoSearchResponse};
pub use naver::{NaverBook, NaverClient, NaverSearchRequest, NaverSearchResponse};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Number of providers the service knows about.
pub const PROVIDER_COUNT: usize = 3;

/// Identity of an external book-search provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Aladin,
    Kakao,
    Naver,
}

impl ProviderKind {
    /// Lowercase identifier used in logs and JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Aladin => "aladin",
            ProviderKind::Kakao => "kakao",
            ProviderKind::Naver => "naver",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request validation errors, surfaced before any network call is made.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("search keyword must not be blank")]
    BlankKeyword,

    #[error("display must be within 1-100, got {0}")]
    DisplayOutOfRange(u32),

    #[error("start must be within 1-1000, got {0}")]
    StartOutOfRange(u32),

    #[error("max_results must be within 1-50, got {0}")]
    MaxResultsOutOfRange(u32),

    #[error("unsupported search target: {0}")]
    UnsupportedTarget(String),
}

/// Errors that can occur when calling a provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request failed validation before any network call
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// Network or transport-level error
    #[error("network error: {0}")]
    Network(String),

    /// The upstream API answered with a non-success status
    #[error("{provider} API returned status {status}")]
    Api { provider: ProviderKind, status: u16 },

    /// The payload did not match the expected schema
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(format!("JSON: {}", err))
    }
}

/// Aladin search client interface.
#[async_trait]
pub trait AladinApi: Send + Sync + std::fmt::Debug {
    async fn search(&self, request: &AladinSearchRequest)
        -> Result<AladinSearchResponse, ProviderError>;
}

/// Kakao search client interface.
#[async_trait]
pub trait KakaoApi: Send + Sync + std::fmt::Debug {
    async fn search(&self, request: &KakaoSearchRequest)
        -> Result<KakaoSearchResponse, ProviderError>;
}

/// Naver search client interface.
#[async_trait]
pub trait NaverApi: Send + Sync + std::fmt::Debug {
    async fn search(&self, request: &NaverSearchRequest)
        -> Result<NaverSearchResponse, ProviderError>;
}
