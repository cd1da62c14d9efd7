//! 시장 시간 기반 조회 캐시.
//!
//! # 동작 흐름
//!
//! ```text
//! get_fresh()
//!         │
//!         ▼
//! ┌────────────────────┐
//! │ 1. 재조회 필요 판단  │ ← 비어 있음? 또는 (장중 && 간격 초과)?
//! └─────────┬──────────┘
//!       NO  │ YES
//!       │   ▼
//!       │ ┌────────────────────┐
//!       │ │ 2. 조회 Lock 획득   │ ← 같은 캐시는 한 번에 하나만 조회
//!       │ └─────────┬──────────┘
//!       │           ▼
//!       │ ┌────────────────────┐
//!       │ │ 3. 다시 판단 후 조회 │ ← 대기 중 다른 요청이 갱신했으면 생략
//!       │ └─────────┬──────────┘
//!       │           ▼
//!       │ ┌────────────────────┐
//!       │ │ 4. 성공 시 교체      │ ← 실패/빈 결과는 기존 값 유지
//!       │ └─────────┬──────────┘
//!       ▼           ▼
//! ┌────────────────────┐
//! │ 5. 현재 값 반환      │
//! └────────────────────┘
//! ```
//!
//! 조회 실패는 호출자에게 전파되지 않습니다. 호출자는 가장 최근에 성공한
//! 값(오래됐을 수 있음) 또는 한 번도 성공하지 못했다면 `None`을 받습니다.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::entry::{CacheEntry, EntryState};
use super::policy::RefreshPolicy;
use crate::error::FetchError;
use crate::market::MarketClock;
use crate::provider::{FetchPayload, Fetcher};

/// 캐시 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKind {
    /// 금 시세 갱신 내역
    GoldUpdates,
    /// 환율
    Currency,
}

impl CacheKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKind::GoldUpdates => "gold_updates",
            CacheKind::Currency => "currency",
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 캐시 상태 스냅샷 (헬스 체크용).
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub kind: CacheKind,
    pub state: EntryState,
    /// 값의 경과 시간 (초)
    pub age_secs: Option<i64>,
    pub fetched_at: Option<DateTime<Utc>>,
    /// `get_fresh` 호출 수
    pub requests: u64,
    /// 완료된 조회 시도 수 (성공 + 실패)
    pub fetches: u64,
    /// 실패한 조회 수
    pub failures: u64,
    /// 마지막 조회 실패 사유 (성공하면 지워짐)
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct CacheCounters {
    requests: AtomicU64,
    fetches: AtomicU64,
    failures: AtomicU64,
}

/// 단일 데이터 소스에 대한 조회 캐시.
///
/// 재조회 조건: `값 없음 || (시장 개장 && 경과 시간 > active_interval)`.
/// 시장이 닫혀 있는 동안에는 값이 아무리 오래돼도 그대로 반환합니다.
pub struct SmartCache<T> {
    kind: CacheKind,
    entry: RwLock<CacheEntry<T>>,
    /// 조회 직렬화 Lock (single-flight)
    fetch_lock: Mutex<()>,
    fetcher: Arc<dyn Fetcher<Output = T>>,
    clock: MarketClock,
    policy: RefreshPolicy,
    counters: CacheCounters,
    last_error: RwLock<Option<String>>,
}

impl<T> SmartCache<T>
where
    T: FetchPayload + Send + Sync + 'static,
{
    pub fn new(
        kind: CacheKind,
        fetcher: Arc<dyn Fetcher<Output = T>>,
        clock: MarketClock,
        policy: RefreshPolicy,
    ) -> Self {
        Self {
            kind,
            entry: RwLock::new(CacheEntry::new()),
            fetch_lock: Mutex::new(()),
            fetcher,
            clock,
            policy,
            counters: CacheCounters::default(),
            last_error: RwLock::new(None),
        }
    }

    pub fn clock(&self) -> &MarketClock {
        &self.clock
    }

    /// 현재 시각 기준으로 값 조회 (필요하면 재조회).
    pub async fn get_fresh(&self) -> Option<Arc<T>> {
        self.get_fresh_at(Utc::now()).await
    }

    /// 주어진 시각 기준으로 값 조회 (필요하면 재조회).
    ///
    /// 조회 Lock을 기다리는 동안 다른 요청의 조회 시도가 끝났다면 그 결과를
    /// 공유하고 다시 조회하지 않습니다.
    pub async fn get_fresh_at(&self, now: DateTime<Utc>) -> Option<Arc<T>> {
        self.counters.requests.fetch_add(1, Ordering::Relaxed);

        {
            let entry = self.entry.read().await;
            if !self.should_fetch(&entry, now) {
                debug!(kind = %self.kind, "캐시 값 반환");
                return entry.value();
            }
        }

        let attempts_before = self.counters.fetches.load(Ordering::Acquire);
        let _guard = self.fetch_lock.lock().await;

        if self.counters.fetches.load(Ordering::Acquire) != attempts_before {
            debug!(kind = %self.kind, "대기 중 완료된 조회 결과 공유");
            return self.entry.read().await.value();
        }

        {
            let entry = self.entry.read().await;
            if !self.should_fetch(&entry, now) {
                return entry.value();
            }
            debug!(
                kind = %self.kind,
                state = ?entry.state(),
                age_secs = entry.age(now).map(|age| age.num_seconds()),
                "캐시 갱신 시작"
            );
        }

        self.refresh(now).await
    }

    /// 재조회가 필요한지 판단.
    pub fn should_fetch(&self, entry: &CacheEntry<T>, now: DateTime<Utc>) -> bool {
        match entry.age(now) {
            None => true,
            Some(age) => self.clock.is_open(now) && self.policy.is_stale(age),
        }
    }

    /// 상태 스냅샷.
    pub async fn status(&self, now: DateTime<Utc>) -> CacheStatus {
        let (state, age_secs, fetched_at) = {
            let entry = self.entry.read().await;
            (
                entry.state(),
                entry.age(now).map(|age| age.num_seconds()),
                entry.fetched_at(),
            )
        };

        CacheStatus {
            kind: self.kind,
            state,
            age_secs,
            fetched_at,
            requests: self.counters.requests.load(Ordering::Relaxed),
            fetches: self.counters.fetches.load(Ordering::Acquire),
            failures: self.counters.failures.load(Ordering::Relaxed),
            last_error: self.last_error.read().await.clone(),
        }
    }

    /// Fetcher 호출 후 성공하면 교체. `fetch_lock`을 잡은 상태에서만 호출.
    async fn refresh(&self, now: DateTime<Utc>) -> Option<Arc<T>> {
        let result = match tokio::time::timeout(self.policy.fetch_timeout, self.fetcher.fetch()).await
        {
            Ok(Ok(value)) if value.is_empty_payload() => {
                Err(FetchError::EmptyDocument("빈 조회 결과".to_string()))
            }
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(format!(
                "{}ms 내 응답 없음",
                self.policy.fetch_timeout.as_millis()
            ))),
        };

        let value = match result {
            Ok(value) => {
                let mut entry = self.entry.write().await;
                entry.store(value, now);
                *self.last_error.write().await = None;

                info!(
                    kind = %self.kind,
                    source = self.fetcher.source(),
                    "캐시 갱신 완료"
                );
                entry.value()
            }
            Err(e) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                *self.last_error.write().await = Some(e.to_string());

                let entry = self.entry.read().await;
                warn!(
                    kind = %self.kind,
                    source = self.fetcher.source(),
                    code = e.code(),
                    retryable = e.is_retryable(),
                    error = %e,
                    has_stale = entry.has_value(),
                    "데이터 가져오기 실패, 캐시 데이터 사용"
                );
                entry.value()
            }
        };

        self.counters.fetches.fetch_add(1, Ordering::Release);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchResult;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use gold_core::CurrencyRate;
    use std::sync::atomic::AtomicUsize;

    /// 호출 횟수를 세고 매번 같은 환율을 돌려주는 Fetcher
    struct CountingFetcher {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Fetcher for CountingFetcher {
        type Output = CurrencyRate;

        fn source(&self) -> &str {
            "counting"
        }

        async fn fetch(&self) -> FetchResult<CurrencyRate> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Status(502));
            }
            Ok(CurrencyRate {
                name: "THB".to_string(),
                fields: Default::default(),
            })
        }
    }

    fn cache(fail: bool) -> (SmartCache<CurrencyRate>, Arc<CountingFetcher>) {
        let fetcher = Arc::new(CountingFetcher {
            calls: AtomicUsize::new(0),
            fail,
        });
        let cache = SmartCache::new(
            CacheKind::Currency,
            fetcher.clone(),
            MarketClock::AlwaysOpen,
            RefreshPolicy::default(),
        );
        (cache, fetcher)
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 3, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_should_fetch_when_empty() {
        let (cache, _) = cache(false);
        let entry = CacheEntry::new();
        assert!(cache.should_fetch(&entry, t0()));
    }

    #[tokio::test]
    async fn test_reuses_value_within_interval() {
        let (cache, fetcher) = cache(false);

        assert!(cache.get_fresh_at(t0()).await.is_some());
        assert!(cache.get_fresh_at(t0() + Duration::seconds(60)).await.is_some());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

        cache.get_fresh_at(t0() + Duration::seconds(121)).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_status_counts_failures() {
        let (cache, _) = cache(true);

        assert!(cache.get_fresh_at(t0()).await.is_none());
        let status = cache.status(t0()).await;

        assert_eq!(status.kind, CacheKind::Currency);
        assert_eq!(status.state, EntryState::Empty);
        assert_eq!(status.requests, 1);
        assert_eq!(status.fetches, 1);
        assert_eq!(status.failures, 1);
        assert!(status.last_error.unwrap().contains("502"));
    }

    #[tokio::test]
    async fn test_status_json_shape() {
        let (cache, _) = cache(false);
        cache.get_fresh_at(t0()).await;

        let json = serde_json::to_value(cache.status(t0() + Duration::seconds(30)).await).unwrap();
        assert_eq!(json["kind"], "currency");
        assert_eq!(json["state"], "populated");
        assert_eq!(json["age_secs"], 30);
        assert!(json["last_error"].is_null());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(CacheKind::GoldUpdates.to_string(), "gold_updates");
        assert_eq!(CacheKind::Currency.as_str(), "currency");
    }
}
