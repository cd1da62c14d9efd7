//! 외부 데이터 소스 (Fetcher).
//!
//! - `goldtraders`: 금 거래상 협회 HTML 페이지 (시세 갱신 내역, 장신구 시세)
//! - `thaigold`: 환율 JSON 피드
//!
//! 모든 Fetcher는 캐시를 모르는 순수 조회기입니다. 네트워크 오류는 panic 없이
//! `FetchError`로 반환합니다.

pub mod goldtraders;
pub mod thaigold;

pub use goldtraders::{parse_jewelry_table, parse_update_table, GoldUpdatesFetcher, JewelryFetcher};
pub use thaigold::{find_currency, CurrencyFetcher};

use async_trait::async_trait;
use gold_core::{CurrencyRate, GoldPriceUpdate};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::error::{FetchError, FetchResult};

/// 데이터 조회 트레잇.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// 조회 결과 타입
    type Output: Send;

    /// 로그용 소스 이름.
    fn source(&self) -> &str;

    /// 한 번 조회.
    async fn fetch(&self) -> FetchResult<Self::Output>;
}

/// 캐시에 저장할 가치가 있는 결과인지 판단.
pub trait FetchPayload {
    fn is_empty_payload(&self) -> bool;
}

impl FetchPayload for Vec<GoldPriceUpdate> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl FetchPayload for CurrencyRate {
    fn is_empty_payload(&self) -> bool {
        self.name.is_empty()
    }
}

/// 공통 HTTP 클라이언트 생성.
pub(crate) fn build_client(user_agent: &str, timeout: Duration) -> FetchResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| FetchError::Http(format!("HTTP 클라이언트 생성 실패: {}", e)))
}

/// GET 요청 후 본문을 UTF-8로 읽습니다.
///
/// 응답 헤더의 charset과 관계없이 UTF-8로 디코딩합니다.
pub(crate) async fn get_text(client: &Client, url: &str) -> FetchResult<String> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status(status.as_u16()));
    }

    let bytes = response.bytes().await?;
    debug!(url = url, bytes = bytes.len(), "응답 수신");

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
