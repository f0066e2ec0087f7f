//! 월간 세션 통계.
//!
//! 일별 집계 맵에서 월 전체 요약을 계산합니다.
//! 승률은 일별 승률을 평균하지 않고, 각 날의 수익 거래 수를 복원해
//! 전체 거래 수로 나눕니다.

use chrono::NaiveDate;
use journal_core::{accumulate, win_rate_pct, DecimalExt, Percentage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::DayMap;

/// 특정 날짜의 손익.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPnl {
    pub date: NaiveDate,
    pub pnl: Decimal,
}

/// 월간 요약.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    /// 월 손익 합계
    pub total_pnl: Decimal,
    /// 총 거래 수
    pub total_trades: u32,
    /// 거래가 있었던 날 수
    pub trading_days: u32,
    /// 수익 마감일 수
    pub green_days: u32,
    /// 손실 마감일 수
    pub red_days: u32,
    /// 전체 승률 (0~100, 소수점 2자리)
    pub win_rate: Percentage,
    /// 최고의 날
    pub best_day: Option<DayPnl>,
    /// 최악의 날
    pub worst_day: Option<DayPnl>,
}

impl MonthSummary {
    /// 일별 집계에서 요약을 계산합니다.
    pub fn from_days(days: &DayMap) -> Self {
        let mut summary = Self::default();
        let mut wins = 0u32;

        for (date, day) in days {
            summary.total_pnl = accumulate(summary.total_pnl, day.pnl);
            summary.total_trades = summary.total_trades.saturating_add(day.trades);
            wins = wins.saturating_add(day.wins());

            if day.trades > 0 {
                summary.trading_days += 1;
            }
            if day.is_green() {
                summary.green_days += 1;
            } else if day.is_red() {
                summary.red_days += 1;
            }

            let current = DayPnl {
                date: *date,
                pnl: day.pnl,
            };
            // 동률이면 이른 날짜를 유지한다
            if summary.best_day.map_or(true, |b| day.pnl > b.pnl) {
                summary.best_day = Some(current);
            }
            if summary.worst_day.map_or(true, |w| day.pnl < w.pnl) {
                summary.worst_day = Some(current);
            }
        }

        summary.total_pnl = summary.total_pnl.round_cents();
        let trades = summary.total_trades;
        summary.win_rate = win_rate_pct(wins.min(trades), trades).round_cents();
        summary
    }
}
