//! Mock provider clients for testing.
//!
//! Each mock records how often it was invoked and can be scripted to return
//! a canned response, fail, or stall for a fixed delay (to exercise the
//! facade's fan-out timing and timeout behavior).

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::providers::{
    AladinApi, AladinSearchRequest, AladinSearchResponse, KakaoApi, KakaoMeta,
    KakaoSearchRequest, KakaoSearchResponse, NaverApi, NaverSearchRequest, NaverSearchResponse,
    ProviderError, ProviderKind,
};

/// Scripted behavior shared by the three mocks.
#[derive(Debug)]
struct MockScript<T> {
    response: Mutex<Option<T>>,
    fail: AtomicBool,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl<T> Default for MockScript<T> {
    fn default() -> Self {
        Self {
            response: Mutex::new(None),
            fail: AtomicBool::new(false),
            delay: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }
}

impl<T: Clone> MockScript<T> {
    fn set_response(&self, response: T) {
        *self.response.lock().unwrap() = Some(response);
    }

    fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn run(&self, provider: ProviderKind, fallback: T) -> Result<T, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(ProviderError::Api {
                provider,
                status: 500,
            });
        }

        let scripted = self.response.lock().unwrap().clone();
        Ok(scripted.unwrap_or(fallback))
    }
}

/// Mock Aladin client.
#[derive(Debug, Default)]
pub struct MockAladin {
    script: MockScript<AladinSearchResponse>,
}

impl MockAladin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a canned response.
    pub fn with_response(response: AladinSearchResponse) -> Self {
        let mock = Self::new();
        mock.script.set_response(response);
        mock
    }

    /// Make every call fail with an upstream 500.
    pub fn failing() -> Self {
        let mock = Self::new();
        mock.script.set_fail(true);
        mock
    }

    pub fn set_delay(&self, delay: Duration) {
        self.script.set_delay(delay);
    }

    pub fn call_count(&self) -> usize {
        self.script.call_count()
    }
}

#[async_trait]
impl AladinApi for MockAladin {
    async fn search(
        &self,
        request: &AladinSearchRequest,
    ) -> Result<AladinSearchResponse, ProviderError> {
        self.script
            .run(ProviderKind::Aladin, sample_aladin_response(&request.query, 0))
            .await
    }
}

/// Mock Kakao client.
#[derive(Debug, Default)]
pub struct MockKakao {
    script: MockScript<KakaoSearchResponse>,
}

impl MockKakao {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(response: KakaoSearchResponse) -> Self {
        let mock = Self::new();
        mock.script.set_response(response);
        mock
    }

    pub fn failing() -> Self {
        let mock = Self::new();
        mock.script.set_fail(true);
        mock
    }

    pub fn set_delay(&self, delay: Duration) {
        self.script.set_delay(delay);
    }

    pub fn call_count(&self) -> usize {
        self.script.call_count()
    }
}

#[async_trait]
impl KakaoApi for MockKakao {
    async fn search(
        &self,
        _request: &KakaoSearchRequest,
    ) -> Result<KakaoSearchResponse, ProviderError> {
        self.script
            .run(ProviderKind::Kakao, sample_kakao_response(0))
            .await
    }
}

/// Mock Naver client.
#[derive(Debug, Default)]
pub struct MockNaver {
    script: MockScript<NaverSearchResponse>,
}

impl MockNaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(response: NaverSearchResponse) -> Self {
        let mock = Self::new();
        mock.script.set_response(response);
        mock
    }

    pub fn failing() -> Self {
        let mock = Self::new();
        mock.script.set_fail(true);
        mock
    }

    pub fn set_delay(&self, delay: Duration) {
        self.script.set_delay(delay);
    }

    pub fn call_count(&self) -> usize {
        self.script.call_count()
    }
}

#[async_trait]
impl NaverApi for MockNaver {
    async fn search(
        &self,
        _request: &NaverSearchRequest,
    ) -> Result<NaverSearchResponse, ProviderError> {
        self.script
            .run(ProviderKind::Naver, sample_naver_response(0))
            .await
    }
}

/// Build a minimal Aladin response for tests.
pub fn sample_aladin_response(query: &str, total_results: u64) -> AladinSearchResponse {
    AladinSearchResponse {
        version: "20131101".to_string(),
        title: format!("알라딘 검색결과 - {}", query),
        link: String::new(),
        pub_date: String::new(),
        total_results,
        start_index: 1,
        query: query.to_string(),
        search_category_id: 0,
        search_category_name: "전체".to_string(),
        item: Vec::new(),
    }
}

/// Build a minimal Kakao response for tests.
pub fn sample_kakao_response(total_count: u64) -> KakaoSearchResponse {
    KakaoSearchResponse {
        meta: KakaoMeta {
            total_count,
            pageable_count: total_count.min(50),
            is_end: total_count == 0,
        },
        documents: Vec::new(),
    }
}

/// Build a minimal Naver response for tests.
pub fn sample_naver_response(total: u64) -> NaverSearchResponse {
    NaverSearchResponse {
        last_build_date: "Wed, 06 Nov 2024 17:34:14 +0900".to_string(),
        total,
        start: 1,
        display: 10,
        items: Vec::new(),
    }
}
