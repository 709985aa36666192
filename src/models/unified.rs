//! Unified search result and derived statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::providers::{
    AladinSearchResponse, KakaoSearchResponse, NaverSearchResponse, PROVIDER_COUNT,
};

/// Aggregate of one search keyword fanned out to all providers.
///
/// Each provider slot is optional: present means the provider answered,
/// absent means it was skipped or failed. Slots are keyed by provider
/// identity, never by completion order. The whole value lives for one
/// request and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedSearchResult {
    /// The keyword the search was issued with
    pub keyword: String,

    pub aladin: Option<AladinSearchResponse>,

    pub kakao: Option<KakaoSearchResponse>,

    pub naver: Option<NaverSearchResponse>,

    /// When the aggregate result was captured
    pub searched_at: DateTime<Utc>,
}

impl UnifiedSearchResult {
    /// Number of providers that answered.
    pub fn successful_provider_count(&self) -> usize {
        [
            self.aladin.is_some(),
            self.kakao.is_some(),
            self.naver.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Whether at least one provider answered.
    pub fn has_any_results(&self) -> bool {
        self.aladin.is_some() || self.kakao.is_some() || self.naver.is_some()
    }

    /// Sum of each present provider's reported total hit count.
    ///
    /// The three APIs name this field differently (Aladin `totalResults`,
    /// Kakao `meta.total_count`, Naver `total`), so each is read from its
    /// own schema.
    pub fn total_book_count(&self) -> u64 {
        self.aladin.as_ref().map_or(0, |r| r.total_results)
            + self.kakao.as_ref().map_or(0, |r| r.meta.total_count)
            + self.naver.as_ref().map_or(0, |r| r.total)
    }
}

/// Statistics derived from one [`UnifiedSearchResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStatistics {
    /// The keyword the statistics were computed for
    pub keyword: String,

    /// Sum of all present providers' total hit counts
    pub total_results: u64,

    /// Number of providers that answered
    pub successful_apis: usize,

    /// Number of providers that did not, out of the full provider set
    pub failed_apis: usize,

    /// Success percentage, 0.0-100.0
    pub success_rate: f64,
}

impl SearchStatistics {
    /// Derive statistics from an aggregate result.
    ///
    /// `failed_apis` always counts against the full set of providers,
    /// regardless of how many were actually requested.
    pub fn from_result(result: &UnifiedSearchResult) -> Self {
        let successful_apis = result.successful_provider_count();
        let failed_apis = PROVIDER_COUNT - successful_apis;

        let attempted = successful_apis + failed_apis;
        let success_rate = if attempted > 0 {
            (successful_apis as f64 / attempted as f64) * 100.0
        } else {
            0.0
        };

        Self {
            keyword: result.keyword.clone(),
            total_results: result.total_book_count(),
            successful_apis,
            failed_apis,
            success_rate,
        }
    }
}
