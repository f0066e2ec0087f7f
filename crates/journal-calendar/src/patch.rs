//! 낙관적 일별 패치.
//!
//! 실시간 "거래 청산" 알림이 오면 전체 재조회 없이 해당 날짜의 집계만
//! 증분 갱신합니다. 결과는 확정값이 아니며, 다음 전체 조회가 항상 덮어씁니다.
//!
//! 집계기와의 차이: R-multiple이 없는 거래를 집계기는 R 통계에서 제외하지만
//! 패치는 0으로 계산합니다. 다음 재조회까지 두 값이 약간 다를 수 있습니다.

use chrono::Datelike;
use journal_core::{accumulate, win_rate_pct, DecimalExt, SettlementZone, TradeRecord};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::aggregate::{DayAggregate, DayMap};

/// 새로 청산된 거래 한 건을 현재 집계 맵에 반영합니다.
///
/// 다음 경우 맵을 그대로 돌려줍니다:
/// - 결제일(청산일, 없으면 진입일)이 없거나 파싱할 수 없음
/// - 결제월이 `visible_month0`(0 기반 월 인덱스)와 다름
///
/// 반환된 맵만이 이후의 유일한 기준입니다.
pub fn patch_day(
    mut days: DayMap,
    trade: &TradeRecord,
    visible_month0: u32,
    zone: &SettlementZone,
) -> DayMap {
    let Some(date) = trade.settlement_date(zone) else {
        debug!("Live trade has no settlement date, patch skipped");
        return days;
    };

    if date.month0() != visible_month0 {
        debug!(%date, visible_month0, "Live trade outside visible month, patch skipped");
        return days;
    }

    let pnl = trade.realized_pnl();
    // 평균에는 반올림 전 R을 넣고 저장값만 반올림한다
    let r = trade.r_multiple.unwrap_or(Decimal::ZERO);

    match days.get_mut(&date) {
        Some(day) if day.trades > 0 => {
            let prev_trades = day.trades;
            let prev_wins = day.wins();

            let trades = prev_trades + 1;
            let wins = if pnl > Decimal::ZERO {
                prev_wins + 1
            } else {
                prev_wins
            };

            day.pnl = accumulate(day.pnl, pnl).round_cents();
            match day
                .avg_r
                .checked_mul(Decimal::from(prev_trades))
                .and_then(|sum| sum.checked_add(r))
                .and_then(|sum| sum.checked_div(Decimal::from(trades)))
            {
                Some(avg) => day.avg_r = avg.round_cents(),
                None => warn!(%date, r = %r, "R average overflows, previous average kept"),
            }
            day.best_r = day.best_r.max(r).round_cents();
            day.worst_r = day.worst_r.min(r).round_cents();
            day.trades = trades;
            day.win_rate = win_rate_pct(wins.min(trades), trades);
        }
        _ => {
            days.insert(date, DayAggregate::single(pnl, r));
        }
    }

    debug!(%date, pnl = %pnl, "Day patched optimistically");
    days
}
