//! 테스트용 스텁 Fetcher와 샘플 데이터.
//!
//! `test-utils` 기능으로 다른 크레이트 테스트에서도 사용할 수 있습니다.

use async_trait::async_trait;
use gold_core::{CurrencyRate, GoldPriceUpdate, JewelryPrice, PricePair};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::error::{FetchError, FetchResult};
use crate::provider::Fetcher;

/// 미리 정한 순서대로 결과를 돌려주는 Fetcher.
///
/// 스크립트가 소진되면 `always`로 지정한 값을, 없으면 HTTP 오류를 반환합니다.
pub struct ScriptedFetcher<T> {
    script: Mutex<VecDeque<FetchResult<T>>>,
    fallback: Option<T>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl<T: Clone + Send + Sync + 'static> ScriptedFetcher<T> {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// 매번 같은 값을 반환.
    pub fn always(value: T) -> Self {
        Self {
            fallback: Some(value),
            ..Self::new()
        }
    }

    /// 매번 실패.
    pub fn failing() -> Self {
        Self::new()
    }

    pub fn then_ok(self, value: T) -> Self {
        self.push(Ok(value))
    }

    pub fn then_err(self, error: FetchError) -> Self {
        self.push(Err(error))
    }

    /// 각 호출이 응답하기 전에 대기 (tokio 시간 기준).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 지금까지의 호출 수.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(self, result: FetchResult<T>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
        self
    }

    fn next_result(&self) -> FetchResult<T> {
        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match (scripted, &self.fallback) {
            (Some(result), _) => result,
            (None, Some(value)) => Ok(value.clone()),
            (None, None) => Err(FetchError::Http("connection refused".to_string())),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ScriptedFetcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Fetcher for ScriptedFetcher<T> {
    type Output = T;

    fn source(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self) -> FetchResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_result()
    }
}

/// 회차 `no`의 샘플 갱신 기록.
pub fn sample_update(no: u32) -> GoldPriceUpdate {
    GoldPriceUpdate {
        date_time: format!("19/10/2569 09:{:02}", no),
        no,
        gold_bar: PricePair::new("41,200.00", "41,300.00"),
        gold_ornament: PricePair::new("40,372.00", "41,800.00"),
        spot: "2,050.10".to_string(),
        change: "50".to_string(),
    }
}

/// 최신 회차가 먼저 오는 샘플 갱신 내역.
pub fn sample_updates(count: u32) -> Vec<GoldPriceUpdate> {
    (1..=count).rev().map(sample_update).collect()
}

/// 샘플 THB 환율.
pub fn sample_rate(bid: &str) -> CurrencyRate {
    let mut fields = Map::new();
    fields.insert("bid".to_string(), Value::from(bid));
    fields.insert("ask".to_string(), Value::from("32.55"));
    CurrencyRate {
        name: "THB".to_string(),
        fields,
    }
}

/// 샘플 장신구 시세.
pub fn sample_jewelry() -> Vec<JewelryPrice> {
    vec![JewelryPrice {
        kind: "ทองรูปพรรณ 96.5%".to_string(),
        per_gram_buy: "2,648.48".to_string(),
        per_baht_buy: "40,372.00".to_string(),
        per_baht_sell: "41,800.00".to_string(),
    }]
}
