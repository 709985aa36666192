//! Aladin book-search client (ItemSearch API).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::providers::{AladinApi, ProviderError, ProviderKind, ValidationError};
use crate::utils::HttpClient;

const ALADIN_API_BASE: &str = "http://www.aladin.co.kr";

/// Request parameters for the Aladin ItemSearch API.
///
/// Defaults follow the documented API defaults: keyword search over books,
/// ten results per page, newest publications first, JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AladinSearchRequest {
    /// Search term
    pub query: String,

    /// Search field: Keyword (title+author), Title, Author or Publisher
    pub query_type: String,

    /// Results per page, 1-50
    pub max_results: u32,

    /// First result page, 1-based
    pub start: u32,

    /// Target mall: Book, Foreign, Music, DVD, Used, eBook or All
    pub search_target: String,

    /// Sort order: Accuracy, PublishTime, Title, SalesPoint, CustomerRating
    pub sort: String,

    /// Output format; this client only speaks "js" (JSON)
    pub output: String,

    /// API version (date-formatted, latest is 20131101)
    pub version: String,
}

impl Default for AladinSearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            query_type: "Keyword".to_string(),
            max_results: 10,
            start: 1,
            search_target: "Book".to_string(),
            sort: "PublishTime".to_string(),
            output: "js".to_string(),
            version: "20131101".to_string(),
        }
    }
}

impl AladinSearchRequest {
    /// Create a default request for a keyword.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Check the request against the API's documented bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.query.trim().is_empty() {
            return Err(ValidationError::BlankKeyword);
        }
        if !(1..=50).contains(&self.max_results) {
            return Err(ValidationError::MaxResultsOutOfRange(self.max_results));
        }
        if self.start == 0 {
            return Err(ValidationError::StartOutOfRange(self.start));
        }
        Ok(())
    }
}

/// Aladin search response in its native shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AladinSearchResponse {
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub link: String,

    #[serde(default)]
    pub pub_date: String,

    /// Total hit count across all pages
    pub total_results: u64,

    #[serde(default)]
    pub start_index: u64,

    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub search_category_id: i64,

    #[serde(default)]
    pub search_category_name: String,

    #[serde(default)]
    pub item: Vec<AladinBook>,
}

/// A single book record as returned by Aladin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AladinBook {
    pub title: String,

    #[serde(default)]
    pub link: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub pub_date: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub isbn: String,

    #[serde(default)]
    pub isbn13: String,

    #[serde(default)]
    pub item_id: i64,

    #[serde(default)]
    pub price_sales: i64,

    #[serde(default)]
    pub price_standard: i64,

    #[serde(default)]
    pub mall_type: String,

    #[serde(default)]
    pub stock_status: String,

    /// Cover thumbnail URL
    #[serde(default)]
    pub cover: String,

    #[serde(default)]
    pub category_id: i64,

    #[serde(default)]
    pub category_name: String,

    #[serde(default)]
    pub publisher: String,

    #[serde(default)]
    pub customer_review_rank: i32,
}

/// Aladin ItemSearch client.
///
/// Authenticates with a TTB key passed as a query parameter.
#[derive(Debug, Clone)]
pub struct AladinClient {
    client: Arc<Client>,
    ttb_key: String,
    base_url: String,
}

impl AladinClient {
    /// Create a new client with its TTB key.
    pub fn new(ttb_key: impl Into<String>) -> Self {
        Self::with_base_url(ttb_key, ALADIN_API_BASE)
    }

    /// Create a client against a non-default endpoint (used by tests).
    pub fn with_base_url(ttb_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new().into_inner(),
            ttb_key: ttb_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Reuse an already-built HTTP client.
    pub fn from_client(client: &HttpClient, ttb_key: impl Into<String>) -> Self {
        Self {
            client: client.clone_inner(),
            ttb_key: ttb_key.into(),
            base_url: ALADIN_API_BASE.to_string(),
        }
    }
}

#[async_trait]
impl AladinApi for AladinClient {
    async fn search(
        &self,
        request: &AladinSearchRequest,
    ) -> Result<AladinSearchResponse, ProviderError> {
        request.validate()?;

        let url = format!("{}/ttb/api/ItemSearch.aspx", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ttbkey", self.ttb_key.as_str()),
                ("Query", request.query.as_str()),
                ("QueryType", request.query_type.as_str()),
                ("MaxResults", &request.max_results.to_string()),
                ("start", &request.start.to_string()),
                ("SearchTarget", request.search_target.as_str()),
                ("Sort", request.sort.as_str()),
                ("output", request.output.as_str()),
                ("Version", request.version.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to call Aladin: {}", e)))?;

        if !response.status().is_success() {
            return Err(ProviderError::Api {
                provider: ProviderKind::Aladin,
                status: response.status().as_u16(),
            });
        }

        response
            .json::<AladinSearchResponse>()
            .await
            .map_err(|e| ProviderError::Parse(format!("Failed to parse Aladin JSON: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_uses_documented_defaults() {
        let request = AladinSearchRequest::new("clean code");
        assert_eq!(request.query, "clean code");
        assert_eq!(request.query_type, "Keyword");
        assert_eq!(request.max_results, 10);
        assert_eq!(request.start, 1);
        assert_eq!(request.search_target, "Book");
        assert_eq!(request.output, "js");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn blank_query_is_rejected() {
        assert_eq!(
            AladinSearchRequest::new("   ").validate(),
            Err(ValidationError::BlankKeyword)
        );
    }

    #[test]
    fn max_results_bounds_are_enforced() {
        let mut request = AladinSearchRequest::new("rust");
        request.max_results = 0;
        assert_eq!(
            request.validate(),
            Err(ValidationError::MaxResultsOutOfRange(0))
        );
        request.max_results = 51;
        assert_eq!(
            request.validate(),
            Err(ValidationError::MaxResultsOutOfRange(51))
        );
    }

    #[test]
    fn parses_native_response_shape() {
        let body = r#"{
            "version": "20131101",
            "title": "알라딘 검색결과 - 어린왕자",
            "link": "http://www.aladin.co.kr/search/wsearchresult.aspx",
            "pubDate": "Wed, 06 Nov 2024 17:34:14 GMT",
            "totalResults": 145,
            "startIndex": 1,
            "query": "어린왕자",
            "searchCategoryId": 0,
            "searchCategoryName": "전체",
            "item": [{
                "title": "어린왕자",
                "author": "생텍쥐페리",
                "pubDate": "2015-10-20",
                "description": "",
                "isbn": "8932917248",
                "isbn13": "9788932917245",
                "itemId": 263468323,
                "priceSales": 10620,
                "priceStandard": 11800,
                "mallType": "BOOK",
                "stockStatus": "",
                "cover": "https://image.aladin.co.kr/product/2634/68/cover/8932917248_1.jpg",
                "categoryId": 51243,
                "categoryName": "국내도서>소설",
                "publisher": "문예출판사",
                "customerReviewRank": 9
            }]
        }"#;

        let parsed: AladinSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.total_results, 145);
        assert_eq!(parsed.item.len(), 1);
        assert_eq!(parsed.item[0].item_id, 263468323);
        assert_eq!(parsed.item[0].price_standard, 11800);
    }
}
