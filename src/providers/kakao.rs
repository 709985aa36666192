//! Kakao book-search client (Daum book search API).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::providers::{KakaoApi, ProviderError, ProviderKind, ValidationError};
use crate::utils::HttpClient;

const KAKAO_API_BASE: &str = "https://dapi.kakao.com";

/// Search fields the Kakao API accepts for `target`.
const VALID_TARGETS: [&str; 4] = ["title", "isbn", "publisher", "person"];

/// Request parameters for the Kakao book search API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoSearchRequest {
    /// Search term
    pub query: String,

    /// Search field restriction: title, isbn, publisher or person
    #[serde(default = "default_target")]
    pub target: String,
}

fn default_target() -> String {
    "title".to_string()
}

impl KakaoSearchRequest {
    /// Create a title search for a keyword.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            target: default_target(),
        }
    }

    /// Restrict the search to a specific field.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.query.trim().is_empty() {
            return Err(ValidationError::BlankKeyword);
        }
        if !VALID_TARGETS.contains(&self.target.as_str()) {
            return Err(ValidationError::UnsupportedTarget(self.target.clone()));
        }
        Ok(())
    }
}

/// Kakao search response in its native shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoSearchResponse {
    pub meta: KakaoMeta,

    #[serde(default)]
    pub documents: Vec<KakaoDocument>,
}

/// Paging metadata; Kakao reports its total hit count here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoMeta {
    pub total_count: u64,

    #[serde(default)]
    pub pageable_count: u64,

    #[serde(default)]
    pub is_end: bool,
}

/// A single book record as returned by Kakao.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoDocument {
    pub title: String,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default)]
    pub contents: String,

    #[serde(default)]
    pub datetime: String,

    #[serde(default)]
    pub isbn: String,

    #[serde(default)]
    pub price: i64,

    #[serde(default)]
    pub sale_price: i64,

    #[serde(default)]
    pub publisher: String,

    #[serde(default)]
    pub status: String,

    /// Cover thumbnail URL
    #[serde(default)]
    pub thumbnail: String,

    #[serde(default)]
    pub translators: Vec<String>,

    #[serde(default)]
    pub url: String,
}

/// Kakao book search client.
///
/// Authenticates with a REST API key sent as `Authorization: KakaoAK <key>`.
#[derive(Debug, Clone)]
pub struct KakaoClient {
    client: Arc<Client>,
    rest_api_key: String,
    base_url: String,
}

impl KakaoClient {
    /// Create a new client with its REST API key.
    pub fn new(rest_api_key: impl Into<String>) -> Self {
        Self::with_base_url(rest_api_key, KAKAO_API_BASE)
    }

    /// Create a client against a non-default endpoint (used by tests).
    pub fn with_base_url(rest_api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new().into_inner(),
            rest_api_key: rest_api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Reuse an already-built HTTP client.
    pub fn from_client(client: &HttpClient, rest_api_key: impl Into<String>) -> Self {
        Self {
            client: client.clone_inner(),
            rest_api_key: rest_api_key.into(),
            base_url: KAKAO_API_BASE.to_string(),
        }
    }
}

#[async_trait]
impl KakaoApi for KakaoClient {
    async fn search(
        &self,
        request: &KakaoSearchRequest,
    ) -> Result<KakaoSearchResponse, ProviderError> {
        request.validate()?;

        let url = format!("{}/v3/search/book", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", request.query.as_str()),
                ("target", request.target.as_str()),
            ])
            .header("Authorization", format!("KakaoAK {}", self.rest_api_key))
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to call Kakao: {}", e)))?;

        if !response.status().is_success() {
            return Err(ProviderError::Api {
                provider: ProviderKind::Kakao,
                status: response.status().as_u16(),
            });
        }

        response
            .json::<KakaoSearchResponse>()
            .await
            .map_err(|e| ProviderError::Parse(format!("Failed to parse Kakao JSON: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_is_title() {
        let request = KakaoSearchRequest::new("clean code");
        assert_eq!(request.target, "title");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn unknown_target_is_rejected() {
        let request = KakaoSearchRequest::new("clean code").target("subject");
        assert_eq!(
            request.validate(),
            Err(ValidationError::UnsupportedTarget("subject".to_string()))
        );
    }

    #[test]
    fn blank_query_is_rejected() {
        assert_eq!(
            KakaoSearchRequest::new("").validate(),
            Err(ValidationError::BlankKeyword)
        );
    }

    #[test]
    fn parses_native_response_shape() {
        let body = r#"{
            "meta": { "total_count": 100, "pageable_count": 50, "is_end": false },
            "documents": [{
                "title": "클린 코드",
                "authors": ["로버트 C. 마틴"],
                "contents": "애자일 소프트웨어 장인 정신",
                "datetime": "2013-12-24T00:00:00.000+09:00",
                "isbn": "8966260950 9788966260959",
                "price": 33000,
                "sale_price": 29700,
                "publisher": "인사이트",
                "status": "정상판매",
                "thumbnail": "https://search1.kakaocdn.net/thumb/R120x174.q85/?fname=clean-code.jpg",
                "translators": ["박재호", "이해영"],
                "url": "https://search.daum.net/search?q=클린코드"
            }]
        }"#;

        let parsed: KakaoSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.meta.total_count, 100);
        assert!(!parsed.meta.is_end);
        assert_eq!(parsed.documents.len(), 1);
        assert_eq!(parsed.documents[0].sale_price, 29700);
        assert_eq!(parsed.documents[0].translators.len(), 2);
    }
}
