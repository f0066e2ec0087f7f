//! 월간 손익 캘린더.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 월 단위 날짜 범위 계산 ([`month`])
//! - 결제일별 일 집계 ([`aggregate`])
//! - 실시간 청산 알림에 대한 낙관적 일별 패치 ([`patch`], [`live`])
//! - 월간 세션 통계 ([`summary`])
//! - 조회 순서를 보장하는 화면 상태와 비동기 컨트롤러 ([`state`], [`controller`])
//!
//! # 예제
//!
//! ```rust
//! use journal_calendar::{aggregate_trades, patch_day, DayMap};
//! use journal_core::{PositionSide, SettlementZone, TradeRecord};
//! use rust_decimal_macros::dec;
//!
//! let zone = SettlementZone::utc();
//! let trades = vec![
//!     TradeRecord::new()
//!         .with_exit_time("2025-01-01T15:00:00Z")
//!         .with_fill(PositionSide::Long, dec!(10), dec!(11), dec!(100)),
//! ];
//! let days = aggregate_trades(&trades, &zone);
//!
//! let closed = TradeRecord::new()
//!     .with_exit_time("2025-01-01T18:00:00Z")
//!     .with_realized_pnl(dec!(-40));
//! let days: DayMap = patch_day(days, &closed, 0, &zone);
//! assert_eq!(days.values().next().unwrap().trades, 2);
//! ```

pub mod aggregate;
pub mod controller;
pub mod live;
pub mod month;
pub mod patch;
pub mod source;
pub mod state;
pub mod summary;

pub use aggregate::{aggregate_trades, load_month, DayAggregate, DayMap};
pub use controller::{CalendarController, DaySelectHandler};
pub use live::LiveTradeEvent;
pub use month::CalendarMonth;
pub use patch::patch_day;
pub use source::{StaticTradeSource, TradeSummarySource};
pub use state::{CalendarSnapshot, CalendarState, FetchTicket, LiveOutcome};
pub use summary::{DayPnl, MonthSummary};
