//! 라우터 통합 테스트 (캐시 상태별 응답 코드).

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use gold_api::{create_api_router, AppState};
use gold_core::{CurrencyRate, GoldPriceUpdate, JewelryPrice, MarketConfig};
use gold_data::testing::{sample_jewelry, sample_rate, sample_updates, ScriptedFetcher};
use gold_data::{MarketCache, MarketClock, RefreshPolicy};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

struct Fixture {
    gold: Arc<ScriptedFetcher<Vec<GoldPriceUpdate>>>,
    currency: Arc<ScriptedFetcher<CurrencyRate>>,
    jewelry: Arc<ScriptedFetcher<Vec<JewelryPrice>>>,
    clock: MarketClock,
}

impl Fixture {
    fn new(
        gold: ScriptedFetcher<Vec<GoldPriceUpdate>>,
        currency: ScriptedFetcher<CurrencyRate>,
        jewelry: ScriptedFetcher<Vec<JewelryPrice>>,
    ) -> Self {
        Self {
            gold: Arc::new(gold),
            currency: Arc::new(currency),
            jewelry: Arc::new(jewelry),
            clock: MarketClock::AlwaysOpen,
        }
    }

    fn with_clock(mut self, clock: MarketClock) -> Self {
        self.clock = clock;
        self
    }

    fn state(&self) -> Arc<AppState> {
        let cache = MarketCache::new(
            self.gold.clone(),
            self.currency.clone(),
            self.clock,
            RefreshPolicy::default(),
        );
        Arc::new(AppState::new(Arc::new(cache), self.jewelry.clone()))
    }
}

async fn get(state: &Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let app = create_api_router().with_state(Arc::clone(state));

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_root_message() {
    let fixture = Fixture::new(
        ScriptedFetcher::failing(),
        ScriptedFetcher::failing(),
        ScriptedFetcher::failing(),
    );
    let (status, body) = get(&fixture.state(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Gold & Currency API is running");
}

#[tokio::test]
async fn test_populated_routes() {
    let fixture = Fixture::new(
        ScriptedFetcher::always(sample_updates(4)),
        ScriptedFetcher::always(sample_rate("32.45")),
        ScriptedFetcher::always(sample_jewelry()),
    );
    let state = fixture.state();

    let (status, gold) = get(&state, "/api/gold").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gold["no"], 4);

    let (status, currency) = get(&state, "/api/currency").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(currency["name"], "THB");
    assert_eq!(currency["bid"], "32.45");

    let (status, updates) = get(&state, "/api/updates").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updates["count"], 4);

    // 캐시가 채워진 뒤 간격 이내 요청은 재조회하지 않음
    assert_eq!(fixture.gold.calls(), 1);
    assert_eq!(fixture.currency.calls(), 1);
}

#[tokio::test]
async fn test_empty_caches_return_503() {
    let fixture = Fixture::new(
        ScriptedFetcher::failing(),
        ScriptedFetcher::failing(),
        ScriptedFetcher::failing(),
    );
    let state = fixture.state();

    for (uri, message) in [
        ("/api/latest", "Service unavailable"),
        ("/api/gold", "Cannot access goldtraders website"),
        ("/api/currency", "Cannot fetch currency data"),
        ("/api/updates", "Cannot access goldtraders website"),
        ("/api/jewelry", "Cannot access daily prices"),
    ] {
        let (status, body) = get(&state, uri).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
        assert_eq!(body["code"], "SERVICE_UNAVAILABLE", "{}", uri);
        assert_eq!(body["message"], message, "{}", uri);
    }
}

#[tokio::test]
async fn test_jewelry_page_without_table_returns_empty_list() {
    let fixture = Fixture::new(
        ScriptedFetcher::failing(),
        ScriptedFetcher::failing(),
        ScriptedFetcher::always(Vec::new()),
    );
    let (status, body) = get(&fixture.state(), "/api/jewelry").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], Value::Array(Vec::new()));
    assert_eq!(fixture.jewelry.calls(), 1);
}

#[tokio::test]
async fn test_latest_with_partial_data() {
    let fixture = Fixture::new(
        ScriptedFetcher::failing(),
        ScriptedFetcher::always(sample_rate("32.45")),
        ScriptedFetcher::failing(),
    );
    let (status, body) = get(&fixture.state(), "/api/latest").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["gold"].is_null());
    assert_eq!(body["currency"]["name"], "THB");
}

#[tokio::test]
async fn test_market_status_route() {
    let fixture = Fixture::new(
        ScriptedFetcher::failing(),
        ScriptedFetcher::failing(),
        ScriptedFetcher::failing(),
    )
    .with_clock(MarketClock::from_config(&MarketConfig::default()).unwrap());

    let (status, body) = get(&fixture.state(), "/api/market/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "scheduled");
    assert_eq!(body["timezone"], "Asia/Bangkok");
    assert!(body["is_open"].is_boolean());
}

#[tokio::test]
async fn test_health_ready_reflects_cache_state() {
    let fixture = Fixture::new(
        ScriptedFetcher::always(sample_updates(1)),
        ScriptedFetcher::failing(),
        ScriptedFetcher::failing(),
    );
    let state = fixture.state();

    let (status, body) = get(&state, "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");

    get(&state, "/api/latest").await;

    let (status, body) = get(&state, "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["caches"][0]["kind"], "gold_updates");
    assert_eq!(body["caches"][0]["state"], "populated");
    assert_eq!(body["caches"][1]["state"], "empty");
    assert_eq!(body["caches"][1]["failures"], 1);
}

#[tokio::test]
async fn test_health_ready_unhealthy_after_failures() {
    let fixture = Fixture::new(
        ScriptedFetcher::failing(),
        ScriptedFetcher::failing(),
        ScriptedFetcher::failing(),
    );
    let state = fixture.state();

    get(&state, "/api/gold").await;

    let (status, body) = get(&state, "/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn test_liveness() {
    let fixture = Fixture::new(
        ScriptedFetcher::failing(),
        ScriptedFetcher::failing(),
        ScriptedFetcher::failing(),
    );
    let app = create_api_router().with_state(fixture.state());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
