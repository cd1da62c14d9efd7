//! thaigold.info 실시간 환율 피드.
//!
//! 피드는 `{"name": "...", ...}` 객체의 JSON 배열이며, 그중 대상 통화
//! 항목 하나를 원문 그대로 반환합니다.

use async_trait::async_trait;
use gold_core::{CurrencyRate, SourcesConfig};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{build_client, get_text, Fetcher};
use crate::error::{FetchError, FetchResult};

/// 기본 대상 통화
pub const DEFAULT_CURRENCY: &str = "THB";

/// 환율 Fetcher.
pub struct CurrencyFetcher {
    client: Client,
    url: String,
    currency: String,
}

impl CurrencyFetcher {
    pub fn new(url: impl Into<String>, user_agent: &str, timeout: Duration) -> FetchResult<Self> {
        Ok(Self {
            client: build_client(user_agent, timeout)?,
            url: url.into(),
            currency: DEFAULT_CURRENCY.to_string(),
        })
    }

    /// `sources.currency`를 대상 통화로 사용합니다.
    pub fn from_config(config: &SourcesConfig) -> FetchResult<Self> {
        Ok(Self::new(
            config.currency_url.clone(),
            &config.user_agent,
            config.currency_timeout(),
        )?
        .with_currency(config.currency.clone()))
    }

    /// 대상 통화 변경.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

#[async_trait]
impl Fetcher for CurrencyFetcher {
    type Output = CurrencyRate;

    fn source(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> FetchResult<Self::Output> {
        let body = get_text(&self.client, &self.url).await?;
        let rate = find_currency(&body, &self.currency)?;
        debug!(currency = %rate.name, "환율 조회 완료");
        Ok(rate)
    }
}

/// 피드 본문에서 `name`이 `currency`인 첫 항목을 찾습니다.
pub fn find_currency(body: &str, currency: &str) -> FetchResult<CurrencyRate> {
    let items: Vec<Value> = serde_json::from_str(body.trim_start_matches('\u{feff}'))?;

    let item = items
        .into_iter()
        .find(|item| item.get("name").and_then(Value::as_str) == Some(currency))
        .ok_or_else(|| FetchError::EmptyDocument(format!("{} 항목 없음", currency)))?;

    Ok(serde_json::from_value(item)?)
}
