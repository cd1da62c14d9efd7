//! 금 거래상 협회(goldtraders.or.th) 크롤러.
//!
//! ## 데이터 소스
//! - `/UpdatePriceList.aspx`: 당일 장중 가격 갱신 내역 (최신 회차가 첫 행)
//! - `/DailyPrices.aspx`: 장신구 종류별 시세
//!
//! 두 페이지 모두 레이아웃용 테이블이 섞여 있으므로 머리글 문구로 대상
//! 테이블을 찾습니다.

use async_trait::async_trait;
use gold_core::{GoldPriceUpdate, JewelryPrice, PricePair, SourcesConfig};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::debug;

use super::{build_client, get_text, Fetcher};
use crate::error::{FetchError, FetchResult};

/// 갱신 내역 테이블 식별 문구 ("회차")
const UPDATE_TABLE_MARKER: &str = "ครั้งที่";
/// 갱신 내역 테이블 식별 문구 (현물가 열)
const UPDATE_TABLE_SPOT_MARKER: &str = "Gold Spot";
/// 장신구 시세 테이블 식별 문구 ("금 종류")
const JEWELRY_TABLE_MARKER: &str = "ชนิดทอง";

/// 갱신 내역 행의 최소 셀 수
const UPDATE_ROW_MIN_CELLS: usize = 9;
/// 장신구 시세 행의 최소 셀 수
const JEWELRY_ROW_MIN_CELLS: usize = 4;

/// 장중 가격 갱신 내역 Fetcher.
pub struct GoldUpdatesFetcher {
    client: Client,
    url: String,
}

impl GoldUpdatesFetcher {
    pub fn new(url: impl Into<String>, user_agent: &str, timeout: Duration) -> FetchResult<Self> {
        Ok(Self {
            client: build_client(user_agent, timeout)?,
            url: url.into(),
        })
    }

    pub fn from_config(config: &SourcesConfig) -> FetchResult<Self> {
        Self::new(
            config.gold_updates_url.clone(),
            &config.user_agent,
            config.goldtraders_timeout(),
        )
    }
}

#[async_trait]
impl Fetcher for GoldUpdatesFetcher {
    type Output = Vec<GoldPriceUpdate>;

    fn source(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> FetchResult<Self::Output> {
        let body = get_text(&self.client, &self.url).await?;
        let updates = parse_update_table(&body)?;
        debug!(rows = updates.len(), "금 시세 갱신 내역 파싱 완료");
        Ok(updates)
    }
}

/// 장신구 시세 Fetcher.
///
/// 캐시를 거치지 않고 요청마다 직접 조회합니다.
pub struct JewelryFetcher {
    client: Client,
    url: String,
}

impl JewelryFetcher {
    pub fn new(url: impl Into<String>, user_agent: &str, timeout: Duration) -> FetchResult<Self> {
        Ok(Self {
            client: build_client(user_agent, timeout)?,
            url: url.into(),
        })
    }

    pub fn from_config(config: &SourcesConfig) -> FetchResult<Self> {
        Self::new(
            config.jewelry_url.clone(),
            &config.user_agent,
            config.goldtraders_timeout(),
        )
    }
}

#[async_trait]
impl Fetcher for JewelryFetcher {
    type Output = Vec<JewelryPrice>;

    fn source(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> FetchResult<Self::Output> {
        let body = get_text(&self.client, &self.url).await?;
        let prices = parse_jewelry_table(&body)?;
        debug!(rows = prices.len(), "장신구 시세 파싱 완료");
        Ok(prices)
    }
}

/// 갱신 내역 페이지 파싱.
///
/// "ครั้งที่"와 "Gold Spot"을 모두 포함하는 첫 테이블에서 셀이 9개 이상이고
/// 회차 열이 숫자인 행만 추출합니다. 행 순서는 문서 순서를 유지합니다.
pub fn parse_update_table(html: &str) -> FetchResult<Vec<GoldPriceUpdate>> {
    let document = Html::parse_document(html);
    let table = find_table(&document, &[UPDATE_TABLE_MARKER, UPDATE_TABLE_SPOT_MARKER])?
        .ok_or_else(|| FetchError::EmptyDocument("갱신 내역 테이블 없음".to_string()))?;

    let mut updates = Vec::new();
    for cells in table_rows(table)? {
        if cells.len() < UPDATE_ROW_MIN_CELLS {
            continue;
        }

        let Some(no) = parse_round_number(&cells[1]) else {
            continue;
        };

        updates.push(GoldPriceUpdate {
            date_time: collapse_whitespace(&cells[0]),
            no,
            gold_bar: PricePair::new(cells[2].clone(), cells[3].clone()),
            gold_ornament: PricePair::new(cells[4].clone(), cells[5].clone()),
            spot: cells[6].clone(),
            change: cells[8].clone(),
        });
    }

    if updates.is_empty() {
        return Err(FetchError::EmptyDocument("갱신 내역 행 없음".to_string()));
    }

    Ok(updates)
}

/// 장신구 시세 페이지 파싱.
///
/// "ชนิดทอง"을 포함하는 첫 테이블의 머리글 행을 건너뛰고 셀이 4개 이상인
/// 행을 추출합니다. 테이블이 없거나 데이터 행이 없으면 빈 목록입니다.
pub fn parse_jewelry_table(html: &str) -> FetchResult<Vec<JewelryPrice>> {
    let document = Html::parse_document(html);
    let Some(table) = find_table(&document, &[JEWELRY_TABLE_MARKER])? else {
        debug!("장신구 시세 테이블 없음");
        return Ok(Vec::new());
    };

    let prices: Vec<JewelryPrice> = table_rows(table)?
        .into_iter()
        .skip(1)
        .filter(|cells| cells.len() >= JEWELRY_ROW_MIN_CELLS)
        .map(|cells| JewelryPrice {
            kind: cells[0].clone(),
            per_gram_buy: cells[1].clone(),
            per_baht_buy: cells[2].clone(),
            per_baht_sell: cells[3].clone(),
        })
        .collect();

    Ok(prices)
}

/// 회차 열 값을 숫자로 변환.
///
/// ASCII 숫자와 태국 숫자(๐-๙)를 모두 받습니다. 다른 문자가 섞이면 `None`.
fn parse_round_number(raw: &str) -> Option<u32> {
    if raw.is_empty() {
        return None;
    }

    raw.chars().try_fold(0u32, |acc, c| {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            '๐'..='๙' => c as u32 - '๐' as u32,
            _ => return None,
        };
        acc.checked_mul(10)?.checked_add(digit)
    })
}

fn selector(css: &str) -> FetchResult<Selector> {
    Selector::parse(css).map_err(|e| FetchError::Parse(format!("셀렉터 '{}': {}", css, e)))
}

/// 모든 식별 문구를 텍스트에 포함하는 첫 테이블.
fn find_table<'a>(document: &'a Html, markers: &[&str]) -> FetchResult<Option<ElementRef<'a>>> {
    let table_selector = selector("table")?;

    Ok(document.select(&table_selector).find(|table| {
        let text: String = table.text().collect();
        markers.iter().all(|marker| text.contains(marker))
    }))
}

/// 테이블의 각 행을 셀 텍스트 목록으로 변환 (앞뒤 공백 제거).
///
/// 셀이 하나도 없는 머리글 행(`th`만 있는 행)도 빈 목록으로 포함합니다.
fn table_rows(table: ElementRef<'_>) -> FetchResult<Vec<Vec<String>>> {
    let tr = selector("tr")?;
    let td = selector("td")?;

    Ok(table
        .select(&tr)
        .map(|row| {
            row.select(&td)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect()
        })
        .collect())
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
