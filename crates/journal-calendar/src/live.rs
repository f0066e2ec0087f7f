//! 실시간 거래 청산 알림.
//!
//! 알림 페이로드는 두 가지 형태로 옵니다:
//! - 거래 레코드 전체 → 낙관적 패치 대상
//! - `{ "dateISO": "..." }` 날짜 힌트 → 재조회 대상
//!
//! 두 형태를 태그 있는 열거형으로 받아 명시적으로 분기합니다.

use journal_core::TradeRecord;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// 날짜 힌트 필드 이름.
const DATE_HINT_KEY: &str = "dateISO";

/// 거래 레코드로 판단하는 필드 (하나라도 있으면 전체 거래로 본다).
const TRADE_KEYS: &[&str] = &[
    "exitTime",
    "entryTime",
    "exit_time",
    "entry_time",
    "realizedPnl",
    "realized_pnl",
    "side",
];

/// 실시간 거래 청산 이벤트.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveTradeEvent {
    /// 청산된 거래 전체
    Closed(TradeRecord),
    /// 해당 날짜에 변화가 있었다는 힌트
    DateHint {
        /// ISO 8601 날짜 또는 날짜시각
        date_iso: String,
    },
}

impl LiveTradeEvent {
    /// JSON 값에서 이벤트를 해석합니다.
    ///
    /// 객체가 아니면 `None`입니다. 날짜 힌트 키만 있고 거래 필드가 없으면
    /// `DateHint`, 그 외 객체는 `Closed`로 봅니다.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };

        if let Some(hint) = date_hint(&map) {
            return Some(Self::DateHint { date_iso: hint });
        }

        serde_json::from_value(Value::Object(map))
            .ok()
            .map(Self::Closed)
    }
}

fn date_hint(map: &Map<String, Value>) -> Option<String> {
    if TRADE_KEYS.iter().any(|k| map.contains_key(*k)) {
        return None;
    }
    map.get(DATE_HINT_KEY)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
}

impl<'de> Deserialize<'de> for LiveTradeEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value)
            .ok_or_else(|| serde::de::Error::custom("live trade event must be a JSON object"))
    }
}

impl Serialize for LiveTradeEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Closed(trade) => trade.serialize(serializer),
            Self::DateHint { date_iso } => {
                let mut map = Map::new();
                map.insert(DATE_HINT_KEY.to_string(), Value::String(date_iso.clone()));
                map.serialize(serializer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_full_trade_payload() {
        let event: LiveTradeEvent = serde_json::from_value(json!({
            "exitTime": "2025-01-10T14:00:00Z",
            "realizedPnl": 12.5,
            "rMultiple": 0.8
        }))
        .unwrap();

        match event {
            LiveTradeEvent::Closed(trade) => {
                assert_eq!(trade.realized_pnl, Some(dec!(12.5)));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_date_hint_payload() {
        let event: LiveTradeEvent =
            serde_json::from_value(json!({ "dateISO": "2025-01-10" })).unwrap();
        assert_eq!(
            event,
            LiveTradeEvent::DateHint {
                date_iso: "2025-01-10".to_string()
            }
        );
    }

    #[test]
    fn test_trade_fields_take_priority_over_hint() {
        let event = LiveTradeEvent::from_value(json!({
            "dateISO": "2025-01-10",
            "exitTime": "2025-01-11T10:00:00Z"
        }))
        .unwrap();
        assert!(matches!(event, LiveTradeEvent::Closed(_)));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(serde_json::from_value::<LiveTradeEvent>(json!([1, 2])).is_err());
        assert!(LiveTradeEvent::from_value(json!("2025-01-10")).is_none());
    }

    #[test]
    fn test_serialize_round_shape() {
        let hint = LiveTradeEvent::DateHint {
            date_iso: "2025-03-01".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&hint).unwrap(),
            json!({ "dateISO": "2025-03-01" })
        );
    }
}
