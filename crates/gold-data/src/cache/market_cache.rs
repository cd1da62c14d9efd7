//! 서비스 전체 캐시 묶음.

use chrono::{DateTime, Utc};
use gold_core::{CurrencyRate, GoldPriceUpdate};
use std::sync::Arc;

use super::policy::RefreshPolicy;
use super::smart::{CacheKind, CacheStatus, SmartCache};
use crate::market::MarketClock;
use crate::provider::Fetcher;

/// 금 시세 갱신 내역과 환율 캐시.
///
/// 두 캐시는 같은 시장 시계와 정책을 공유하지만 서로 독립적으로 갱신됩니다.
pub struct MarketCache {
    pub gold_updates: SmartCache<Vec<GoldPriceUpdate>>,
    pub currency_rate: SmartCache<CurrencyRate>,
}

impl MarketCache {
    pub fn new(
        gold_fetcher: Arc<dyn Fetcher<Output = Vec<GoldPriceUpdate>>>,
        currency_fetcher: Arc<dyn Fetcher<Output = CurrencyRate>>,
        clock: MarketClock,
        policy: RefreshPolicy,
    ) -> Self {
        Self {
            gold_updates: SmartCache::new(CacheKind::GoldUpdates, gold_fetcher, clock, policy),
            currency_rate: SmartCache::new(CacheKind::Currency, currency_fetcher, clock, policy),
        }
    }

    pub fn clock(&self) -> &MarketClock {
        self.gold_updates.clock()
    }

    /// 모든 캐시 상태.
    pub async fn statuses(&self, now: DateTime<Utc>) -> Vec<CacheStatus> {
        vec![
            self.gold_updates.status(now).await,
            self.currency_rate.status(now).await,
        ]
    }
}
