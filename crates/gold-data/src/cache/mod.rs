//! 조회 캐시 모듈.
//!
//! - `entry`: 마지막 성공 값과 조회 시각
//! - `policy`: 장중 재조회 간격
//! - `smart`: 시장 시간 기반 재조회 판단 + single-flight 조회
//! - `market_cache`: 금 시세 / 환율 캐시 묶음

pub mod entry;
pub mod market_cache;
pub mod policy;
pub mod smart;

pub use entry::{CacheEntry, EntryState};
pub use market_cache::MarketCache;
pub use policy::RefreshPolicy;
pub use smart::{CacheKind, CacheStatus, SmartCache};
