//! 애플리케이션 공유 상태.

use chrono::{DateTime, Utc};
use gold_core::JewelryPrice;
use gold_data::{Fetcher, MarketCache, MarketClock};
use std::sync::Arc;

/// 모든 핸들러가 공유하는 상태.
pub struct AppState {
    /// 금 시세 갱신 내역 / 환율 캐시
    pub cache: Arc<MarketCache>,

    /// 장신구 시세 (캐시 없이 요청마다 조회)
    pub jewelry: Arc<dyn Fetcher<Output = Vec<JewelryPrice>>>,

    /// 서버 시작 시각
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    pub fn new(
        cache: Arc<MarketCache>,
        jewelry: Arc<dyn Fetcher<Output = Vec<JewelryPrice>>>,
    ) -> Self {
        Self {
            cache,
            jewelry,
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn clock(&self) -> &MarketClock {
        self.cache.clock()
    }

    pub fn uptime_secs(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }
}

/// 테스트용 상태 생성.
///
/// 모든 Fetcher가 항상 샘플 데이터를 반환하고 시장은 항상 열려 있습니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use gold_data::testing::{sample_jewelry, sample_rate, sample_updates, ScriptedFetcher};
    use gold_data::RefreshPolicy;

    let cache = MarketCache::new(
        Arc::new(ScriptedFetcher::always(sample_updates(3))),
        Arc::new(ScriptedFetcher::always(sample_rate("32.45"))),
        MarketClock::AlwaysOpen,
        RefreshPolicy::default(),
    );

    AppState::new(
        Arc::new(cache),
        Arc::new(ScriptedFetcher::always(sample_jewelry())),
    )
}
