//! 시세 endpoint.
//!
//! # 엔드포인트
//!
//! - `GET /` - 서비스 안내
//! - `GET /api/latest` - 최신 금 시세 + 환율
//! - `GET /api/gold` - 최신 금 시세
//! - `GET /api/currency` - THB 환율
//! - `GET /api/updates` - 당일 금 시세 갱신 내역
//! - `GET /api/jewelry` - 장신구 시세 (캐시 없음)
//!
//! 금 시세와 환율은 `MarketCache`를 통해 제공되며, 한 번도 조회에 성공하지
//! 못한 경우에만 503을 반환합니다.

use axum::{extract::State, routing::get, Json, Router};
use gold_core::{CurrencyRate, GoldPriceUpdate, JewelryPrice};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::error::{service_unavailable, ApiResult};
use crate::state::AppState;

/// 서비스 안내 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 최신 시세 응답. 한쪽 데이터만 있으면 나머지는 null.
#[derive(Debug, Serialize, Deserialize)]
pub struct LatestResponse {
    pub gold: Option<GoldPriceUpdate>,
    pub currency: Option<CurrencyRate>,
}

/// 갱신 내역 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatesResponse {
    pub count: usize,
    pub data: Vec<GoldPriceUpdate>,
}

/// 장신구 시세 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct JewelryResponse {
    pub data: Vec<JewelryPrice>,
}

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Gold & Currency API is running".to_string(),
    })
}

/// 최신 금 시세와 환율 조회.
///
/// GET /api/latest
pub async fn get_latest(State(state): State<Arc<AppState>>) -> ApiResult<Json<LatestResponse>> {
    let (updates, currency) = tokio::join!(
        state.cache.gold_updates.get_fresh(),
        state.cache.currency_rate.get_fresh()
    );

    let gold = updates.and_then(|updates| updates.first().cloned());
    let currency = currency.map(|rate| CurrencyRate::clone(&rate));

    if gold.is_none() && currency.is_none() {
        return Err(service_unavailable("Service unavailable"));
    }

    Ok(Json(LatestResponse { gold, currency }))
}

/// 최신 금 시세 조회.
///
/// GET /api/gold
pub async fn get_gold(State(state): State<Arc<AppState>>) -> ApiResult<Json<GoldPriceUpdate>> {
    state
        .cache
        .gold_updates
        .get_fresh()
        .await
        .and_then(|updates| updates.first().cloned())
        .map(Json)
        .ok_or_else(|| service_unavailable("Cannot access goldtraders website"))
}

/// THB 환율 조회.
///
/// GET /api/currency
pub async fn get_currency(State(state): State<Arc<AppState>>) -> ApiResult<Json<CurrencyRate>> {
    state
        .cache
        .currency_rate
        .get_fresh()
        .await
        .map(|rate| Json(CurrencyRate::clone(&rate)))
        .ok_or_else(|| service_unavailable("Cannot fetch currency data"))
}

/// 당일 갱신 내역 조회 (최신 회차 먼저).
///
/// GET /api/updates
pub async fn get_updates(State(state): State<Arc<AppState>>) -> ApiResult<Json<UpdatesResponse>> {
    let updates = state
        .cache
        .gold_updates
        .get_fresh()
        .await
        .ok_or_else(|| service_unavailable("Cannot access goldtraders website"))?;

    Ok(Json(UpdatesResponse {
        count: updates.len(),
        data: updates.to_vec(),
    }))
}

/// 장신구 시세 조회.
///
/// 페이지에 시세 테이블이 없으면 빈 `data`로 응답하고, 조회 자체가 실패하면 503.
///
/// GET /api/jewelry
pub async fn get_jewelry(State(state): State<Arc<AppState>>) -> ApiResult<Json<JewelryResponse>> {
    match state.jewelry.fetch().await {
        Ok(data) => Ok(Json(JewelryResponse { data })),
        Err(e) => {
            warn!(source = state.jewelry.source(), error = %e, "장신구 시세 조회 실패");
            Err(service_unavailable("Cannot access daily prices"))
        }
    }
}

/// 시세 라우터 생성 (`/api` 아래에 중첩).
pub fn prices_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/latest", get(get_latest))
        .route("/gold", get(get_gold))
        .route("/currency", get(get_currency))
        .route("/updates", get(get_updates))
        .route("/jewelry", get(get_jewelry))
}
