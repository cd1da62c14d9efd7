//! 캐시 갱신 정책.

use gold_core::CacheConfig;
use std::time::Duration;

/// 장중 재조회 정책.
///
/// 시장이 닫혀 있을 때는 경과 시간과 무관하게 재조회하지 않습니다.
/// 비어 있는 항목만 조회를 유발합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    /// 장중 재조회 최소 경과 시간
    pub active_interval: Duration,
    /// 단일 Fetcher 호출 최대 대기 시간
    pub fetch_timeout: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            active_interval: Duration::from_secs(120),
            fetch_timeout: Duration::from_secs(15),
        }
    }
}

impl RefreshPolicy {
    pub fn new(active_interval: Duration) -> Self {
        Self {
            active_interval,
            ..Default::default()
        }
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            active_interval: config.active_interval(),
            fetch_timeout: config.fetch_timeout(),
        }
    }

    /// 경과 시간이 장중 재조회 간격을 넘었는지 확인.
    pub fn is_stale(&self, age: chrono::Duration) -> bool {
        // std Duration 변환 실패는 간격이 chrono 범위를 넘는 경우뿐이므로 stale 아님
        match chrono::Duration::from_std(self.active_interval) {
            Ok(interval) => age > interval,
            Err(_) => false,
        }
    }
}
