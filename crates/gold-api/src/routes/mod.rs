//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/` - 서비스 안내
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/{latest,gold,currency,updates,jewelry}` - 시세
//! - `/api/market/status` - 금 시장 상태

pub mod health;
pub mod market;
pub mod prices;

pub use health::{health_router, HealthResponse};
pub use market::{market_router, MarketStatusResponse};
pub use prices::{prices_router, JewelryResponse, LatestResponse, MessageResponse, UpdatesResponse};

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(prices::root))
        .nest("/health", health_router())
        .nest("/api", prices_router().nest("/market", market_router()))
}
