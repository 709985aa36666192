//! REST presentation layer.
//!
//! Thin JSON marshalling over the facade operations; no business logic
//! lives here. Aggregate endpoints always answer 200 with possibly-absent
//! provider slots; single-provider endpoints surface provider failures as
//! error statuses.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::facade::{ProviderSelection, SearchFacade};
use crate::models::{SearchStatistics, UnifiedSearchResult};
use crate::providers::{
    AladinSearchRequest, AladinSearchResponse, KakaoSearchRequest, KakaoSearchResponse,
    NaverSearchRequest, NaverSearchResponse, ProviderError, ValidationError,
};

/// Shared server state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub facade: SearchFacade,
}

/// JSON error payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error type handlers return; maps onto an HTTP status + JSON body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        let status = match err {
            ProviderError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search/unified", get(search_unified))
        .route("/api/search/multiple", get(search_multiple))
        .route("/api/search/statistics", get(search_statistics))
        .route("/api/search/aladin", post(search_aladin))
        .route("/api/search/kakao", post(search_kakao))
        .route("/api/search/naver", post(search_naver))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until interrupted.
pub async fn serve(bind: &str, facade: SearchFacade) -> anyhow::Result<()> {
    let state = Arc::new(AppState { facade });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("bookscout listening on http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

#[derive(Debug, Deserialize)]
pub struct KeywordParams {
    pub keyword: String,
}

#[derive(Debug, Deserialize)]
pub struct MultipleParams {
    pub keyword: String,

    #[serde(default = "default_true")]
    pub include_aladin: bool,

    #[serde(default = "default_true")]
    pub include_kakao: bool,

    #[serde(default = "default_true")]
    pub include_naver: bool,
}

fn default_true() -> bool {
    true
}

async fn search_unified(
    State(state): State<Arc<AppState>>,
    Query(params): Query<KeywordParams>,
) -> Result<Json<UnifiedSearchResult>, ApiError> {
    let result = state.facade.search_all(&params.keyword).await?;
    Ok(Json(result))
}

async fn search_multiple(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MultipleParams>,
) -> Result<Json<UnifiedSearchResult>, ApiError> {
    let selection = ProviderSelection {
        aladin: params.include_aladin,
        kakao: params.include_kakao,
        naver: params.include_naver,
    };
    let result = state
        .facade
        .search_multiple(&params.keyword, selection)
        .await?;
    Ok(Json(result))
}

async fn search_statistics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<KeywordParams>,
) -> Result<Json<SearchStatistics>, ApiError> {
    let stats = state.facade.search_statistics(&params.keyword).await?;
    Ok(Json(stats))
}

async fn search_aladin(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AladinSearchRequest>,
) -> Result<Json<AladinSearchResponse>, ApiError> {
    let response = state.facade.search_aladin(&request).await?;
    Ok(Json(response))
}

async fn search_kakao(
    State(state): State<Arc<AppState>>,
    Json(request): Json<KakaoSearchRequest>,
) -> Result<Json<KakaoSearchResponse>, ApiError> {
    let response = state.facade.search_kakao(&request).await?;
    Ok(Json(response))
}

async fn search_naver(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NaverSearchRequest>,
) -> Result<Json<NaverSearchResponse>, ApiError> {
    let response = state.facade.search_naver(&request).await?;
    Ok(Json(response))
}

/// Per-provider liveness as reported by a probe search.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub services: HealthServices,
    pub successful_apis: usize,
    pub total_apis: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthServices {
    pub aladin: String,
    pub kakao: String,
    pub naver: String,
}

fn up_down(present: bool) -> String {
    if present { "UP" } else { "DOWN" }.to_string()
}

async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let probe = state
        .facade
        .search_multiple("health-check", ProviderSelection::all())
        .await?;

    Ok(Json(HealthResponse {
        status: up_down(probe.has_any_results()),
        timestamp: probe.searched_at,
        services: HealthServices {
            aladin: up_down(probe.aladin.is_some()),
            kakao: up_down(probe.kakao.is_some()),
            naver: up_down(probe.naver.is_some()),
        },
        successful_apis: probe.successful_provider_count(),
        total_apis: crate::providers::PROVIDER_COUNT,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::{MockAladin, MockKakao, MockNaver};

    fn state(aladin: MockAladin, kakao: MockKakao, naver: MockNaver) -> Arc<AppState> {
        Arc::new(AppState {
            facade: SearchFacade::new(Arc::new(aladin), Arc::new(kakao), Arc::new(naver)),
        })
    }

    #[tokio::test]
    async fn unified_endpoint_returns_all_slots() {
        let state = state(MockAladin::new(), MockKakao::new(), MockNaver::new());
        let Json(result) = search_unified(
            State(state),
            Query(KeywordParams {
                keyword: "rust".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(result.keyword, "rust");
        assert_eq!(result.successful_provider_count(), 3);
    }

    #[tokio::test]
    async fn blank_keyword_maps_to_bad_request() {
        let state = state(MockAladin::new(), MockKakao::new(), MockNaver::new());
        let err = search_unified(
            State(state),
            Query(KeywordParams {
                keyword: "  ".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn passthrough_failure_maps_to_bad_gateway() {
        let state = state(MockAladin::failing(), MockKakao::new(), MockNaver::new());
        let err = search_aladin(
            State(state),
            Json(AladinSearchRequest::new("rust")),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn health_reports_per_provider_liveness() {
        let state = state(MockAladin::new(), MockKakao::failing(), MockNaver::new());
        let Json(health) = health(State(state)).await.unwrap();

        assert_eq!(health.status, "UP");
        assert_eq!(health.services.aladin, "UP");
        assert_eq!(health.services.kakao, "DOWN");
        assert_eq!(health.services.naver, "UP");
        assert_eq!(health.successful_apis, 2);
        assert_eq!(health.total_apis, 3);
    }
}
