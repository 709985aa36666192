//! Aggregation facade: concurrent fan-out to the three providers.
//!
//! Every aggregate call launches one independent tokio task per included
//! provider and joins on all of them before returning. A provider's failure
//! or timeout only empties that provider's slot; it never aborts the other
//! calls or the aggregate operation. No state is retained between calls and
//! the tasks share no mutable state, so no locking is needed.

use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::config::Config;
use crate::models::{SearchStatistics, UnifiedSearchResult};
use crate::providers::{
    AladinApi, AladinClient, AladinSearchRequest, AladinSearchResponse, KakaoApi, KakaoClient,
    KakaoSearchRequest, KakaoSearchResponse, NaverApi, NaverClient, NaverSearchRequest,
    NaverSearchResponse, ProviderError, ProviderKind, ValidationError,
};
use crate::utils::HttpClient;

/// Default per-provider deadline inside the fan-out.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Which providers an aggregate search should fan out to.
///
/// A deselected provider is skipped entirely: its task is never launched and
/// its absent slot does not count as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderSelection {
    pub aladin: bool,
    pub kakao: bool,
    pub naver: bool,
}

impl ProviderSelection {
    /// Select all three providers.
    pub fn all() -> Self {
        Self {
            aladin: true,
            kakao: true,
            naver: true,
        }
    }
}

impl Default for ProviderSelection {
    fn default() -> Self {
        Self::all()
    }
}

/// Unified book-search facade over the three provider clients.
#[derive(Debug, Clone)]
pub struct SearchFacade {
    aladin: Arc<dyn AladinApi>,
    kakao: Arc<dyn KakaoApi>,
    naver: Arc<dyn NaverApi>,
    provider_timeout: Duration,
}

impl SearchFacade {
    /// Create a facade from three provider clients.
    pub fn new(
        aladin: Arc<dyn AladinApi>,
        kakao: Arc<dyn KakaoApi>,
        naver: Arc<dyn NaverApi>,
    ) -> Self {
        Self {
            aladin,
            kakao,
            naver,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Build real provider clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        let http = HttpClient::with_timeout(Duration::from_secs(config.http.request_timeout_secs));
        let credentials = &config.credentials;

        Self::new(
            Arc::new(AladinClient::from_client(&http, &credentials.aladin_ttb_key)),
            Arc::new(KakaoClient::from_client(&http, &credentials.kakao_rest_api_key)),
            Arc::new(NaverClient::from_client(
                &http,
                &credentials.naver_client_id,
                &credentials.naver_client_secret,
            )),
        )
        .with_provider_timeout(Duration::from_secs(config.http.provider_timeout_secs))
    }

    /// Override the per-provider deadline used inside the fan-out.
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Search a single provider; errors propagate unmodified.
    pub async fn search_aladin(
        &self,
        request: &AladinSearchRequest,
    ) -> Result<AladinSearchResponse, ProviderError> {
        self.aladin.search(request).await
    }

    /// Search a single provider; errors propagate unmodified.
    pub async fn search_kakao(
        &self,
        request: &KakaoSearchRequest,
    ) -> Result<KakaoSearchResponse, ProviderError> {
        self.kakao.search(request).await
    }

    /// Search a single provider; errors propagate unmodified.
    pub async fn search_naver(
        &self,
        request: &NaverSearchRequest,
    ) -> Result<NaverSearchResponse, ProviderError> {
        self.naver.search(request).await
    }

    /// Fan one keyword out to all three providers concurrently.
    ///
    /// Waits for all three to resolve. A failed or timed-out provider only
    /// empties its own slot in the result.
    pub async fn search_all(
        &self,
        keyword: &str,
    ) -> Result<UnifiedSearchResult, ValidationError> {
        self.search_multiple(keyword, ProviderSelection::all()).await
    }

    /// Fan one keyword out to the selected providers concurrently.
    ///
    /// Deselected providers are never launched; their slots stay absent
    /// without counting as failures. A blank keyword is rejected before any
    /// task starts; otherwise the keyword is dispatched and echoed verbatim,
    /// whitespace included.
    pub async fn search_multiple(
        &self,
        keyword: &str,
        selection: ProviderSelection,
    ) -> Result<UnifiedSearchResult, ValidationError> {
        if keyword.trim().is_empty() {
            return Err(ValidationError::BlankKeyword);
        }

        let aladin_task = selection.aladin.then(|| {
            let client = Arc::clone(&self.aladin);
            let request = AladinSearchRequest::new(keyword);
            let timeout = self.provider_timeout;
            tokio::spawn(async move {
                attempt(ProviderKind::Aladin, timeout, client.search(&request)).await
            })
        });

        let kakao_task = selection.kakao.then(|| {
            let client = Arc::clone(&self.kakao);
            let request = KakaoSearchRequest::new(keyword);
            let timeout = self.provider_timeout;
            tokio::spawn(async move {
                attempt(ProviderKind::Kakao, timeout, client.search(&request)).await
            })
        });

        let naver_task = selection.naver.then(|| {
            let client = Arc::clone(&self.naver);
            let request = NaverSearchRequest::new(keyword);
            let timeout = self.provider_timeout;
            tokio::spawn(async move {
                attempt(ProviderKind::Naver, timeout, client.search(&request)).await
            })
        });

        Ok(UnifiedSearchResult {
            keyword: keyword.to_string(),
            aladin: join_slot(aladin_task).await,
            kakao: join_slot(kakao_task).await,
            naver: join_slot(naver_task).await,
            searched_at: Utc::now(),
        })
    }

    /// Run [`Self::search_all`] and derive statistics from the result.
    pub async fn search_statistics(
        &self,
        keyword: &str,
    ) -> Result<SearchStatistics, ValidationError> {
        let result = self.search_all(keyword).await?;
        Ok(SearchStatistics::from_result(&result))
    }
}

/// Run one provider call under the fan-out deadline, converting failure and
/// timeout into an absent slot.
async fn attempt<T, F>(provider: ProviderKind, limit: Duration, call: F) -> Option<T>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(response)) => Some(response),
        Ok(Err(e)) => {
            warn!(%provider, error = %e, "provider search failed");
            None
        }
        Err(_) => {
            warn!(
                %provider,
                timeout_ms = limit.as_millis() as u64,
                "provider search timed out"
            );
            None
        }
    }
}

/// Join a launched provider task. `None` means the provider was skipped.
async fn join_slot<T>(handle: Option<JoinHandle<Option<T>>>) -> Option<T> {
    match handle {
        Some(handle) => handle.await.unwrap_or_else(|e| {
            warn!(error = %e, "provider task aborted");
            None
        }),
        None => None,
    }
}
