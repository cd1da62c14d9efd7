//! 환율 레코드.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 통화 환율 레코드.
///
/// thaigold.info 피드의 항목을 그대로 전달합니다. `name` 외의 필드는
/// 피드 구성에 따라 달라지므로 `fields`에 원문 그대로 보관합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    /// 통화 코드 (예: "THB")
    pub name: String,
    /// 나머지 원문 필드
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CurrencyRate {
    /// 원문 필드 조회.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_unknown_fields() {
        let raw = r#"{"name":"THB","bid":"32.45","ask":"32.55","time":"10:00"}"#;
        let rate: CurrencyRate = serde_json::from_str(raw).unwrap();

        assert_eq!(rate.name, "THB");
        assert_eq!(rate.field("bid"), Some(&Value::from("32.45")));

        let back = serde_json::to_value(&rate).unwrap();
        assert_eq!(back["ask"], "32.55");
        assert_eq!(back["name"], "THB");
    }
}
