//! 마지막으로 성공한 조회 결과 보관.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// 캐시 항목 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    /// 한 번도 조회에 성공하지 못함
    Empty,
    /// 값 보유 (오래됐을 수 있음)
    Populated,
}

#[derive(Debug)]
struct Stored<T> {
    value: Arc<T>,
    fetched_at: DateTime<Utc>,
}

/// 마지막으로 성공한 값과 조회 시각.
///
/// 값과 시각은 한 묶음으로만 교체되므로 읽는 쪽은 이전 쌍이나 새 쌍 중
/// 하나만 봅니다. 한 번 채워지면 다시 비워지지 않습니다.
#[derive(Debug)]
pub struct CacheEntry<T> {
    stored: Option<Stored<T>>,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self { stored: None }
    }
}

impl<T> CacheEntry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_value(&self) -> bool {
        self.stored.is_some()
    }

    pub fn state(&self) -> EntryState {
        if self.has_value() {
            EntryState::Populated
        } else {
            EntryState::Empty
        }
    }

    pub fn value(&self) -> Option<Arc<T>> {
        self.stored.as_ref().map(|s| Arc::clone(&s.value))
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.stored.as_ref().map(|s| s.fetched_at)
    }

    /// 값의 경과 시간. 비어 있으면 `None`.
    ///
    /// 시계가 뒤로 간 경우 0으로 취급합니다.
    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.stored
            .as_ref()
            .map(|s| (now - s.fetched_at).max(Duration::zero()))
    }

    /// 값과 조회 시각을 함께 교체.
    pub fn store(&mut self, value: T, now: DateTime<Utc>) {
        self.stored = Some(Stored {
            value: Arc::new(value),
            fetched_at: now,
        });
    }
}
