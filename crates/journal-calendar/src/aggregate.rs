//! 월별 일 단위 집계.
//!
//! 한 달치 거래 레코드를 결제일(청산일, 없으면 진입일)별로 묶어
//! 일별 손익, 거래 수, 승률, R-multiple 통계를 계산합니다.
//!
//! # 반올림 규칙
//!
//! - 일 손익: 합계를 소수점 2자리로 반올림
//! - 평균/최고/최저 R: 각각 소수점 2자리로 반올림
//! - 승률: 반올림하지 않음 (0~100)
//!
//! 낙관적 패치([`crate::patch`])도 같은 규칙을 따라야 합니다.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use journal_core::{
    accumulate, mean, win_rate_pct, DecimalExt, Percentage, SettlementZone, TradeRecord,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::month::CalendarMonth;
use crate::source::TradeSummarySource;

/// 결제일 → 일별 집계 맵. 직렬화 시 키는 `YYYY-MM-DD`.
pub type DayMap = BTreeMap<NaiveDate, DayAggregate>;

/// 하루 집계.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAggregate {
    /// 실현 손익 합계 (소수점 2자리)
    pub pnl: Decimal,
    /// 거래 수
    pub trades: u32,
    /// 승률 (0~100)
    pub win_rate: Percentage,
    /// 평균 R-multiple
    pub avg_r: Decimal,
    /// 최고 R-multiple
    pub best_r: Decimal,
    /// 최저 R-multiple
    pub worst_r: Decimal,
}

impl DayAggregate {
    /// 거래 한 건만 있는 날의 집계.
    pub fn single(pnl: Decimal, r: Decimal) -> Self {
        let r = r.round_cents();
        Self {
            pnl: pnl.round_cents(),
            trades: 1,
            win_rate: if pnl > Decimal::ZERO {
                dec!(100)
            } else {
                Decimal::ZERO
            },
            avg_r: r,
            best_r: r,
            worst_r: r,
        }
    }

    /// 승률과 거래 수로부터 수익 거래 수를 복원합니다.
    pub fn wins(&self) -> u32 {
        (self.win_rate / dec!(100) * Decimal::from(self.trades))
            .round_whole()
            .to_u32()
            .unwrap_or(0)
    }

    /// 수익으로 마감한 날인지.
    pub fn is_green(&self) -> bool {
        self.pnl > Decimal::ZERO
    }

    /// 손실로 마감한 날인지.
    pub fn is_red(&self) -> bool {
        self.pnl < Decimal::ZERO
    }
}

/// 결제일 하나에 대한 누적 상태.
#[derive(Debug, Default)]
struct DayAccumulator {
    pnl: Decimal,
    trades: u32,
    wins: u32,
    r_values: Vec<Decimal>,
}

impl DayAccumulator {
    fn push(&mut self, trade: &TradeRecord) {
        let pnl = trade.realized_pnl();
        self.pnl = accumulate(self.pnl, pnl);
        self.trades += 1;
        if pnl > Decimal::ZERO {
            self.wins += 1;
        }
        if let Some(r) = trade.r_multiple {
            self.r_values.push(r);
        }
    }

    fn finish(self) -> DayAggregate {
        let best = self.r_values.iter().copied().max().unwrap_or(Decimal::ZERO);
        let worst = self.r_values.iter().copied().min().unwrap_or(Decimal::ZERO);

        DayAggregate {
            pnl: self.pnl.round_cents(),
            trades: self.trades,
            win_rate: win_rate_pct(self.wins, self.trades),
            avg_r: mean(&self.r_values).unwrap_or(Decimal::ZERO).round_cents(),
            best_r: best.round_cents(),
            worst_r: worst.round_cents(),
        }
    }
}

/// 거래 목록을 결제일별로 집계합니다.
///
/// 결제일을 알 수 없는 거래(청산/진입 시각이 모두 없거나 파싱 불가)는
/// 어떤 날에도 포함되지 않습니다.
pub fn aggregate_trades(trades: &[TradeRecord], zone: &SettlementZone) -> DayMap {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    let mut dropped = 0usize;

    for trade in trades {
        let Some(date) = trade.settlement_date(zone) else {
            dropped += 1;
            continue;
        };
        days.entry(date).or_default().push(trade);
    }

    if dropped > 0 {
        debug!(dropped, "Trades without settlement date skipped");
    }

    days.into_iter()
        .map(|(date, acc)| (date, acc.finish()))
        .collect()
}

/// 월 전체를 조회해서 집계합니다.
///
/// 조회 실패는 빈 맵으로 취급합니다 (캘린더는 "데이터 없음"을 보여줌).
pub async fn load_month<S>(source: &S, month: CalendarMonth, zone: &SettlementZone) -> DayMap
where
    S: TradeSummarySource + ?Sized,
{
    let (from, to) = month.range();

    match source.fetch_trades(from, to).await {
        Ok(trades) => {
            let days = aggregate_trades(&trades, zone);
            debug!(
                month = %month,
                trades = trades.len(),
                days = days.len(),
                "Month aggregated"
            );
            days
        }
        Err(e) => {
            warn!(month = %month, error = %e, "Trade summary fetch failed, showing empty month");
            DayMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_core::PositionSide;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_long_and_short_same_day() {
        let trades = vec![
            TradeRecord::new()
                .with_exit_time("2025-01-01T15:00:00Z")
                .with_fill(PositionSide::Long, dec!(10), dec!(11), dec!(100)),
            TradeRecord::new()
                .with_exit_time("2025-01-01T16:00:00Z")
                .with_fill(PositionSide::Short, dec!(20), dec!(22), dec!(50)),
        ];

        let days = aggregate_trades(&trades, &SettlementZone::utc());
        let day = &days[&date(2025, 1, 1)];

        assert_eq!(day.pnl, dec!(0.00));
        assert_eq!(day.trades, 2);
        assert_eq!(day.win_rate, dec!(50));
        assert_eq!(day.wins(), 1);
        assert_eq!(day.avg_r, Decimal::ZERO);
        assert_eq!(day.best_r, Decimal::ZERO);
        assert_eq!(day.worst_r, Decimal::ZERO);
    }

    #[test]
    fn test_r_statistics() {
        let trades = vec![
            TradeRecord::new()
                .with_exit_time("2025-01-02")
                .with_realized_pnl(dec!(50))
                .with_r_multiple(dec!(1)),
            TradeRecord::new()
                .with_exit_time("2025-01-02")
                .with_realized_pnl(dec!(-25))
                .with_r_multiple(dec!(-0.5)),
            TradeRecord::new()
                .with_exit_time("2025-01-02")
                .with_realized_pnl(dec!(120))
                .with_r_multiple(dec!(2.555)),
            // R 없음: 평균에서 제외
            TradeRecord::new()
                .with_exit_time("2025-01-02")
                .with_realized_pnl(dec!(0)),
        ];

        let days = aggregate_trades(&trades, &SettlementZone::utc());
        let day = &days[&date(2025, 1, 2)];

        assert_eq!(day.trades, 4);
        assert_eq!(day.pnl, dec!(145));
        assert_eq!(day.win_rate, dec!(50));
        // (1 - 0.5 + 2.555) / 3 = 1.018333.. -> 1.02
        assert_eq!(day.avg_r, dec!(1.02));
        assert_eq!(day.best_r, dec!(2.56));
        assert_eq!(day.worst_r, dec!(-0.5));
    }

    #[test]
    fn test_entry_time_fallback_and_dropped() {
        let trades = vec![
            TradeRecord::new()
                .with_entry_time("2025-01-03T09:00:00Z")
                .with_realized_pnl(dec!(10)),
            TradeRecord::new().with_realized_pnl(dec!(999)),
            TradeRecord::new()
                .with_exit_time("not a date")
                .with_entry_time("2025-01-03T09:00:00Z")
                .with_realized_pnl(dec!(999)),
        ];

        let days = aggregate_trades(&trades, &SettlementZone::utc());
        assert_eq!(days.len(), 1);
        assert_eq!(days[&date(2025, 1, 3)].trades, 1);
        assert_eq!(days[&date(2025, 1, 3)].pnl, dec!(10));
    }

    #[test]
    fn test_zero_wins_is_zero_rate() {
        let trades = vec![
            TradeRecord::new()
                .with_exit_time("2025-01-04")
                .with_realized_pnl(dec!(-5)),
            TradeRecord::new()
                .with_exit_time("2025-01-04")
                .with_realized_pnl(Decimal::ZERO),
        ];

        let days = aggregate_trades(&trades, &SettlementZone::utc());
        assert_eq!(days[&date(2025, 1, 4)].win_rate, Decimal::ZERO);
    }

    #[test]
    fn test_pnl_sum_rounded_once() {
        let trades = vec![
            TradeRecord::new()
                .with_exit_time("2025-01-05")
                .with_realized_pnl(dec!(0.004)),
            TradeRecord::new()
                .with_exit_time("2025-01-05")
                .with_realized_pnl(dec!(0.004)),
        ];

        let days = aggregate_trades(&trades, &SettlementZone::utc());
        assert_eq!(days[&date(2025, 1, 5)].pnl, dec!(0.01));
    }

    #[test]
    fn test_oversized_values_saturate() {
        let big = dec!(50000000000000000000000000000);
        let trades = vec![
            TradeRecord::new()
                .with_exit_time("2025-01-08")
                .with_realized_pnl(big)
                .with_r_multiple(big),
            TradeRecord::new()
                .with_exit_time("2025-01-08")
                .with_realized_pnl(big)
                .with_r_multiple(big),
        ];

        let days = aggregate_trades(&trades, &SettlementZone::utc());
        let day = &days[&date(2025, 1, 8)];
        assert_eq!(day.pnl, Decimal::MAX);
        assert_eq!(day.trades, 2);
        assert_eq!(day.wins(), 2);
        // 평균이 넘치면 0
        assert_eq!(day.avg_r, Decimal::ZERO);
        assert_eq!(day.best_r, big);
    }

    #[test]
    fn test_wins_reconstruction() {
        let day = DayAggregate {
            pnl: dec!(10),
            trades: 3,
            win_rate: win_rate_pct(1, 3),
            avg_r: Decimal::ZERO,
            best_r: Decimal::ZERO,
            worst_r: Decimal::ZERO,
        };
        assert_eq!(day.wins(), 1);
    }

    #[test]
    fn test_serialized_keys_are_iso_dates() {
        let days = aggregate_trades(
            &[TradeRecord::new()
                .with_exit_time("2025-01-06")
                .with_realized_pnl(dec!(1))],
            &SettlementZone::utc(),
        );
        let json = serde_json::to_value(&days).unwrap();
        assert!(json.get("2025-01-06").is_some());
        assert!(json["2025-01-06"].get("winRate").is_some());
    }
}
