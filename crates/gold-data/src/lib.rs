//! 시세 수집 및 캐싱.
//!
//! 이 crate는 다음을 제공합니다:
//! - 시장 운영 시간 판단 (`MarketClock`)
//! - 시장 시간 기반 조회 캐시 (`SmartCache`, `MarketCache`)
//! - goldtraders.or.th / thaigold.info 데이터 소스

pub mod cache;
pub mod error;
pub mod market;
pub mod provider;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::{FetchError, FetchResult};
pub use market::{MarketClock, MarketSchedule};

pub use cache::{
    CacheEntry, CacheKind, CacheStatus, EntryState, MarketCache, RefreshPolicy, SmartCache,
};

pub use provider::{
    CurrencyFetcher, FetchPayload, Fetcher, GoldUpdatesFetcher, JewelryFetcher,
};
