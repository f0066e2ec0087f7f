//! 매매일지 REST API 연결.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - [`RestTradeSource`]: 캘린더의 `TradeSummarySource` REST 구현
//! - 배열/페이지네이션 응답을 모두 읽는 거래 목록 파서
//! - 전송 계층 에러 분류 ([`ClientError`])

pub mod client;
pub mod error;
pub mod types;

pub use client::RestTradeSource;
pub use error::*;
pub use types::{parse_trade_list, trades_from_value, LIST_KEYS};
