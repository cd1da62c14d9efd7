//! 헬스 체크 endpoint.
//!
//! 서버 상태 확인을 위한 헬스 체크 엔드포인트를 제공합니다.
//! 로드밸런서나 오케스트레이션 시스템(Kubernetes 등)에서 사용됩니다.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use gold_data::{CacheStatus, EntryState};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy" | "degraded" | "idle" | "unhealthy")
    pub status: String,

    /// API 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,

    /// 현재 시간 (ISO 8601)
    pub timestamp: String,

    /// 금 시장 개장 여부
    pub market_open: bool,

    /// 캐시별 상태
    pub caches: Vec<CacheStatus>,
}

/// 캐시 상태로 전체 상태 판단.
///
/// 값이 하나도 없더라도 아직 조회를 시도한 적이 없으면 `idle`입니다.
pub fn overall_status(caches: &[CacheStatus]) -> &'static str {
    let populated = caches
        .iter()
        .filter(|c| c.state == EntryState::Populated)
        .count();

    if populated == caches.len() {
        "healthy"
    } else if populated > 0 {
        "degraded"
    } else if caches.iter().all(|c| c.fetches == 0) {
        "idle"
    } else {
        "unhealthy"
    }
}

/// 간단한 헬스 체크 (liveness probe용).
///
/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 상세 헬스 체크 (readiness probe용).
///
/// 캐시를 갱신하지 않고 현재 상태만 보고합니다.
/// GET /health/ready
pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let now = Utc::now();
    let caches = state.cache.statuses(now).await;
    let status = overall_status(&caches);

    let status_code = if status == "unhealthy" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: now.to_rfc3339(),
        market_open: state.clock().is_open(now),
        caches,
    };

    (status_code, Json(response))
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use gold_data::CacheKind;
    use tower::ServiceExt;

    fn status(kind: CacheKind, state: EntryState, fetches: u64) -> CacheStatus {
        CacheStatus {
            kind,
            state,
            age_secs: None,
            fetched_at: None,
            requests: fetches,
            fetches,
            failures: 0,
            last_error: None,
        }
    }

    #[test]
    fn test_overall_status() {
        use CacheKind::*;
        use EntryState::*;

        assert_eq!(
            overall_status(&[status(GoldUpdates, Populated, 1), status(Currency, Populated, 1)]),
            "healthy"
        );
        assert_eq!(
            overall_status(&[status(GoldUpdates, Populated, 1), status(Currency, Empty, 2)]),
            "degraded"
        );
        assert_eq!(
            overall_status(&[status(GoldUpdates, Empty, 0), status(Currency, Empty, 0)]),
            "idle"
        );
        assert_eq!(
            overall_status(&[status(GoldUpdates, Empty, 1), status(Currency, Empty, 0)]),
            "unhealthy"
        );
    }

    #[tokio::test]
    async fn test_health_check_returns_ok() {
        let app = Router::new().route("/health", get(health_check));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_before_first_request() {
        use crate::state::create_test_state;

        let state = Arc::new(create_test_state());
        let app = Router::new()
            .route("/health/ready", get(health_ready))
            .with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(health["status"], "idle");
        assert_eq!(health["market_open"], true);
        assert_eq!(health["caches"].as_array().unwrap().len(), 2);
        assert!(!health["version"].as_str().unwrap().is_empty());
    }
}
