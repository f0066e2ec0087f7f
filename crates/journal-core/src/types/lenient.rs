//! 외부 API 레코드를 위한 관대한 역직렬화 헬퍼.
//!
//! 캘린더는 잘못된 레코드 하나 때문에 실패해서는 안 됩니다.
//! 숫자가 아니거나 유한하지 않은 값, 알 수 없는 타입은 에러 대신
//! `None`(값 없음)으로 취급합니다.

use chrono::DateTime;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// JSON 값을 유한한 Decimal로 변환합니다.
///
/// 숫자와 숫자 문자열("12.5", "1e3")을 허용합니다.
/// `NaN`, `Infinity`, 빈 문자열, 불리언, 객체 등은 `None`입니다.
pub fn lenient_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                n.as_f64().and_then(Decimal::from_f64)
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed
                .parse::<Decimal>()
                .ok()
                .or_else(|| Decimal::from_scientific(trimmed).ok())
        }
        _ => None,
    }
}

/// JSON 값을 타임스탬프 문자열로 변환합니다.
///
/// 문자열은 공백을 제거한 뒤 그대로 보관하고(빈 문자열은 `None`),
/// 숫자는 epoch 밀리초로 보고 RFC 3339 UTC 문자열로 바꿉니다.
pub fn lenient_timestamp(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.to_rfc3339()),
        _ => None,
    }
}

/// `#[serde(deserialize_with = ...)]`용 Decimal 역직렬화기.
pub fn deserialize_lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(lenient_decimal))
}

/// `#[serde(deserialize_with = ...)]`용 타임스탬프 역직렬화기.
pub fn deserialize_lenient_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(lenient_timestamp))
}
