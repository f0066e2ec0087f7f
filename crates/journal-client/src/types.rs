//! 거래 요약 응답 형식.
//!
//! 서버는 거래 배열을 그대로 보내거나, 페이지네이션 객체 안의
//! `items` / `data` / `trades` / `results` 필드에 담아 보냅니다.

use journal_core::TradeRecord;
use serde_json::Value;
use tracing::debug;

use crate::error::ClientError;

/// 페이지네이션 객체에서 목록을 찾는 필드 (우선순위 순).
pub const LIST_KEYS: [&str; 4] = ["items", "data", "trades", "results"];

/// 응답 본문에서 거래 목록을 읽습니다.
pub fn parse_trade_list(body: &str) -> Result<Vec<TradeRecord>, ClientError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse trade summary: {}", e)))?;
    trades_from_value(value)
}

/// JSON 값에서 거래 목록을 읽습니다.
///
/// 목록 필드가 없는 객체는 빈 목록입니다. 레코드로 읽을 수 없는 항목
/// (객체가 아닌 값 등)은 건너뜁니다.
pub fn trades_from_value(value: Value) -> Result<Vec<TradeRecord>, ClientError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => LIST_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        other => {
            return Err(ClientError::ParseError(format!(
                "Unexpected trade summary shape: {}",
                type_name(&other)
            )))
        }
    };

    let total = items.len();
    let trades: Vec<TradeRecord> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if trades.len() < total {
        debug!(skipped = total - trades.len(), "Unreadable trade entries skipped");
    }

    Ok(trades)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
