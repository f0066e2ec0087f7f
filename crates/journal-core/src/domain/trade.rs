//! 매매일지 거래 기록.
//!
//! 이 모듈은 외부 API가 내려주는 거래 레코드를 정의합니다:
//! - `PositionSide` - 포지션 방향 (LONG/SHORT)
//! - `TradeRecord` - 개별 거래 기록 (모든 필드가 선택적)
//!
//! 레코드는 읽기 전용 입력입니다. 식별자나 생명주기를 관리하지 않으며,
//! 잘못된 필드는 역직렬화 단계에서 "값 없음"으로 떨어집니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use super::calculations::realized_pnl;
use super::settlement::SettlementZone;
use crate::types::{
    deserialize_lenient_decimal, deserialize_lenient_timestamp, DecimalExt, Price, Quantity,
};

/// 포지션 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    /// 롱 (매수 후 매도)
    Long,
    /// 숏 (매도 후 매수)
    Short,
}

impl PositionSide {
    /// 대소문자를 무시하고 방향 문자열을 파싱합니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "LONG" => Some(Self::Long),
            "SHORT" => Some(Self::Short),
            _ => None,
        }
    }
}

impl std::fmt::Display for PositionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "LONG"),
            Self::Short => write!(f, "SHORT"),
        }
    }
}

fn deserialize_lenient_side<'de, D>(deserializer: D) -> Result<Option<PositionSide>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => PositionSide::parse(&s),
        _ => None,
    })
}

/// 외부 API의 거래 레코드.
///
/// 필드 이름은 API와 동일한 camelCase이며, snake_case 별칭도 허용합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// 진입 시각 (ISO 8601)
    #[serde(
        default,
        alias = "entry_time",
        deserialize_with = "deserialize_lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub entry_time: Option<String>,
    /// 청산 시각 (ISO 8601)
    #[serde(
        default,
        alias = "exit_time",
        deserialize_with = "deserialize_lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit_time: Option<String>,
    /// 포지션 방향
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_side",
        skip_serializing_if = "Option::is_none"
    )]
    pub side: Option<PositionSide>,
    /// 진입가
    #[serde(
        default,
        alias = "entry_price",
        deserialize_with = "deserialize_lenient_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub entry_price: Option<Price>,
    /// 청산가
    #[serde(
        default,
        alias = "exit_price",
        deserialize_with = "deserialize_lenient_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit_price: Option<Price>,
    /// 수량
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<Quantity>,
    /// API가 직접 제공한 실현 손익
    #[serde(
        default,
        alias = "realized_pnl",
        deserialize_with = "deserialize_lenient_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub realized_pnl: Option<Decimal>,
    /// R-multiple (초기 리스크 대비 손익 배수)
    #[serde(
        default,
        alias = "r_multiple",
        deserialize_with = "deserialize_lenient_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub r_multiple: Option<Decimal>,
}

impl TradeRecord {
    /// 빈 거래 레코드를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 진입 시각을 설정합니다.
    pub fn with_entry_time(mut self, ts: impl Into<String>) -> Self {
        self.entry_time = Some(ts.into());
        self
    }

    /// 청산 시각을 설정합니다.
    pub fn with_exit_time(mut self, ts: impl Into<String>) -> Self {
        self.exit_time = Some(ts.into());
        self
    }

    /// 방향과 가격, 수량을 설정합니다.
    pub fn with_fill(
        mut self,
        side: PositionSide,
        entry_price: Price,
        exit_price: Price,
        size: Quantity,
    ) -> Self {
        self.side = Some(side);
        self.entry_price = Some(entry_price);
        self.exit_price = Some(exit_price);
        self.size = Some(size);
        self
    }

    /// 실현 손익을 직접 설정합니다.
    pub fn with_realized_pnl(mut self, pnl: Decimal) -> Self {
        self.realized_pnl = Some(pnl);
        self
    }

    /// R-multiple을 설정합니다.
    pub fn with_r_multiple(mut self, r: Decimal) -> Self {
        self.r_multiple = Some(r);
        self
    }

    /// 결제 시각 문자열 (청산 시각, 없으면 진입 시각).
    pub fn settlement_stamp(&self) -> Option<&str> {
        self.exit_time
            .as_deref()
            .or(self.entry_time.as_deref())
    }

    /// 주어진 시간대의 벽시계 기준 결제일.
    ///
    /// 청산/진입 시각이 모두 없거나 파싱할 수 없으면 `None`입니다.
    /// 청산 시각이 있지만 파싱할 수 없는 경우 진입 시각으로 넘어가지 않습니다.
    pub fn settlement_date(&self, zone: &SettlementZone) -> Option<NaiveDate> {
        self.settlement_stamp().and_then(|ts| zone.date_of(ts))
    }

    /// 실현 손익.
    ///
    /// 1. API가 제공한 값이 있으면 그대로 사용
    /// 2. 없으면 방향/진입가/청산가/수량으로 계산 후 소수점 2자리 반올림
    /// 3. 둘 다 불가능하거나 계산이 범위를 넘으면 0
    pub fn realized_pnl(&self) -> Decimal {
        if let Some(pnl) = self.realized_pnl {
            return pnl;
        }

        match (self.side, self.entry_price, self.exit_price, self.size) {
            (Some(side), Some(entry), Some(exit), Some(size)) => {
                match realized_pnl(entry, exit, size, side) {
                    Some(pnl) => pnl.round_cents(),
                    None => {
                        warn!(%entry, %exit, %size, "Fill P&L overflows, counted as zero");
                        Decimal::ZERO
                    }
                }
            }
            _ => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_record() {
        let record: TradeRecord = serde_json::from_value(json!({
            "exitTime": "2025-01-01T15:30:00Z",
            "entryTime": "2025-01-01T09:30:00Z",
            "side": "LONG",
            "entryPrice": 10,
            "exitPrice": "11",
            "size": 100,
            "rMultiple": 1.5
        }))
        .unwrap();

        assert_eq!(record.side, Some(PositionSide::Long));
        assert_eq!(record.exit_price, Some(dec!(11)));
        assert_eq!(record.r_multiple, Some(dec!(1.5)));
        assert_eq!(record.realized_pnl(), dec!(100));
    }

    #[test]
    fn test_deserialize_malformed_fields_as_absent() {
        let record: TradeRecord = serde_json::from_value(json!({
            "side": "SIDEWAYS",
            "entryPrice": "n/a",
            "exitPrice": null,
            "size": [1, 2],
            "realizedPnl": "NaN",
            "rMultiple": {}
        }))
        .unwrap();

        assert_eq!(record, TradeRecord::default());
        assert_eq!(record.realized_pnl(), Decimal::ZERO);
    }

    #[test]
    fn test_snake_case_aliases() {
        let record: TradeRecord = serde_json::from_value(json!({
            "exit_time": "2025-02-03",
            "realized_pnl": -12.5,
            "r_multiple": "-1"
        }))
        .unwrap();

        assert_eq!(record.settlement_stamp(), Some("2025-02-03"));
        assert_eq!(record.realized_pnl(), dec!(-12.5));
        assert_eq!(record.r_multiple, Some(dec!(-1)));
    }

    #[test]
    fn test_supplied_pnl_wins_over_fill() {
        let record = TradeRecord::new()
            .with_fill(PositionSide::Long, dec!(10), dec!(11), dec!(100))
            .with_realized_pnl(dec!(95.5));
        assert_eq!(record.realized_pnl(), dec!(95.5));
    }

    #[test]
    fn test_short_pnl_and_rounding() {
        let record =
            TradeRecord::new().with_fill(PositionSide::Short, dec!(20), dec!(22), dec!(50));
        assert_eq!(record.realized_pnl(), dec!(-100));

        let record = TradeRecord::new().with_fill(
            PositionSide::Long,
            dec!(1.001),
            dec!(1.0065),
            dec!(3),
        );
        // (1.0065 - 1.001) * 3 = 0.0165 -> 0.02
        assert_eq!(record.realized_pnl(), dec!(0.02));
    }

    #[test]
    fn test_overflowing_fill_is_zero() {
        let huge = dec!(100000000000000000000);
        let record = TradeRecord::new().with_fill(PositionSide::Long, dec!(1), huge, huge);
        assert_eq!(record.realized_pnl(), Decimal::ZERO);
    }

    #[test]
    fn test_partial_fill_is_zero() {
        let mut record =
            TradeRecord::new().with_fill(PositionSide::Long, dec!(10), dec!(11), dec!(100));
        record.size = None;
        assert_eq!(record.realized_pnl(), Decimal::ZERO);
    }

    #[test]
    fn test_settlement_stamp_fallback() {
        let record = TradeRecord::new().with_entry_time("2025-01-05T10:00:00Z");
        assert_eq!(record.settlement_stamp(), Some("2025-01-05T10:00:00Z"));

        let record = record.with_exit_time("2025-01-06T10:00:00Z");
        assert_eq!(record.settlement_stamp(), Some("2025-01-06T10:00:00Z"));

        assert_eq!(TradeRecord::new().settlement_stamp(), None);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!(PositionSide::parse("short"), Some(PositionSide::Short));
        assert_eq!(PositionSide::parse(" Long "), Some(PositionSide::Long));
        assert_eq!(PositionSide::parse("BUY"), None);
        assert_eq!(PositionSide::Short.to_string(), "SHORT");
    }
}
