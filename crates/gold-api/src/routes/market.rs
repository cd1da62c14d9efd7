//! 시장 상태 endpoint.
//!
//! # 엔드포인트
//!
//! - `GET /api/market/status` - 금 시장 개장 여부와 운영 시간

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use gold_data::MarketClock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// 시장 상태 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct MarketStatusResponse {
    /// 시장 개장 여부
    pub is_open: bool,
    /// "scheduled" 또는 "always_open"
    pub mode: String,
    /// 시장 시간대 (항상 개장이면 없음)
    pub timezone: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub closed_weekday: Option<String>,
    /// 판단 기준 시각 (ISO 8601)
    pub now: String,
}

impl MarketStatusResponse {
    pub fn from_clock(clock: &MarketClock, now: DateTime<Utc>) -> Self {
        let is_open = clock.is_open(now);
        let now = now.to_rfc3339();

        match clock.schedule() {
            Some(schedule) => Self {
                is_open,
                mode: "scheduled".to_string(),
                timezone: Some(schedule.timezone().name().to_string()),
                open_time: Some(schedule.open_time().format("%H:%M:%S").to_string()),
                close_time: Some(schedule.close_time().format("%H:%M:%S").to_string()),
                closed_weekday: Some(schedule.closed_weekday().to_string()),
                now,
            },
            None => Self {
                is_open,
                mode: "always_open".to_string(),
                timezone: None,
                open_time: None,
                close_time: None,
                closed_weekday: None,
                now,
            },
        }
    }
}

/// 시장 상태 조회.
///
/// GET /api/market/status
pub async fn get_market_status(State(state): State<Arc<AppState>>) -> Json<MarketStatusResponse> {
    Json(MarketStatusResponse::from_clock(state.clock(), Utc::now()))
}

/// 시장 라우터 생성.
pub fn market_router() -> Router<Arc<AppState>> {
    Router::new().route("/status", get(get_market_status))
}
