//! 금 시세 레코드.
//!
//! - `GoldPriceUpdate` - 금 거래상 협회(goldtraders.or.th)의 장중 가격 갱신 1회분
//! - `JewelryPrice` - 장신구 종류별 시세
//!
//! 가격은 원문 문자열(예: "41,250.00")을 그대로 보관합니다.

use serde::{Deserialize, Serialize};

/// 매입/매도 가격 쌍.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePair {
    /// 매입가 (협회가 사들이는 가격)
    pub buy: String,
    /// 매도가
    pub sell: String,
}

impl PricePair {
    pub fn new(buy: impl Into<String>, sell: impl Into<String>) -> Self {
        Self {
            buy: buy.into(),
            sell: sell.into(),
        }
    }
}

/// 장중 금 시세 갱신 기록.
///
/// 하루 동안 여러 번 갱신되며 `no`가 당일 갱신 회차입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldPriceUpdate {
    /// 갱신 일시 (원문, 공백 정규화)
    pub date_time: String,
    /// 당일 갱신 회차
    pub no: u32,
    /// 골드바 96.5%
    pub gold_bar: PricePair,
    /// 금 장신구 96.5%
    pub gold_ornament: PricePair,
    /// 국제 금 현물가 (Gold Spot)
    pub spot: String,
    /// 직전 회차 대비 변동
    pub change: String,
}

/// 장신구 종류별 시세.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JewelryPrice {
    /// 금 종류
    #[serde(rename = "type")]
    pub kind: String,
    /// 그램당 매입가
    pub per_gram_buy: String,
    /// 바트(15.244g)당 매입가
    pub per_baht_buy: String,
    /// 바트당 매도가
    pub per_baht_sell: String,
}
