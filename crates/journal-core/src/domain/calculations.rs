//! 매매 손익 및 통계 계산 공통 로직.
//!
//! 캘린더 집계와 낙관적 패치, 리스크 계산이 공유하는 함수를 제공합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use super::trade::PositionSide;
use crate::types::{Percentage, Price, Quantity};

/// 실현 손익 계산 (수수료 제외, 반올림 없음).
///
/// `Decimal` 범위를 넘으면 `None`입니다.
///
/// # Arguments
///
/// * `entry_price` - 진입 가격
/// * `exit_price` - 청산 가격
/// * `size` - 거래 수량
/// * `side` - 포지션 방향
///
/// # Examples
///
/// ```
/// use journal_core::{realized_pnl, PositionSide};
/// use rust_decimal_macros::dec;
///
/// // 롱: 10에 매수 → 11에 매도, 수량 100
/// assert_eq!(realized_pnl(dec!(10), dec!(11), dec!(100), PositionSide::Long), Some(dec!(100)));
///
/// // 숏: 20에 매도 → 22에 매수, 수량 50
/// assert_eq!(realized_pnl(dec!(20), dec!(22), dec!(50), PositionSide::Short), Some(dec!(-100)));
/// ```
pub fn realized_pnl(
    entry_price: Price,
    exit_price: Price,
    size: Quantity,
    side: PositionSide,
) -> Option<Decimal> {
    let move_per_unit = match side {
        // 롱 포지션: (청산가 - 진입가) × 수량
        PositionSide::Long => exit_price.checked_sub(entry_price)?,
        // 숏 포지션: (진입가 - 청산가) × 수량
        PositionSide::Short => entry_price.checked_sub(exit_price)?,
    };
    move_per_unit.checked_mul(size)
}

/// 손익 누적 덧셈. 범위를 넘으면 경고를 남기고 `Decimal::MAX`/`MIN`으로 포화합니다.
pub fn accumulate(total: Decimal, value: Decimal) -> Decimal {
    total.checked_add(value).unwrap_or_else(|| {
        warn!(total = %total, value = %value, "Decimal overflow, sum saturated");
        total.saturating_add(value)
    })
}

/// 승률 계산 (백분율, 0~100).
///
/// 거래가 없으면 0입니다.
pub fn win_rate_pct(wins: u32, trades: u32) -> Percentage {
    if trades == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(wins) / Decimal::from(trades) * dec!(100)
}

/// 산술 평균. 빈 목록이거나 합계가 범위를 넘으면 `None`.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    sum.checked_div(Decimal::from(values.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_rate_pct() {
        assert_eq!(win_rate_pct(0, 0), Decimal::ZERO);
        assert_eq!(win_rate_pct(0, 3), Decimal::ZERO);
        assert_eq!(win_rate_pct(1, 2), dec!(50));
        assert_eq!(win_rate_pct(4, 4), dec!(100));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[dec!(1), dec!(3)]), Some(dec!(2)));
        assert_eq!(mean(&[dec!(-1.5)]), Some(dec!(-1.5)));
        assert_eq!(mean(&[Decimal::MAX, Decimal::MAX]), None);
    }

    #[test]
    fn test_realized_pnl_overflow() {
        let huge = dec!(100000000000000000000);
        assert_eq!(realized_pnl(Decimal::ZERO, huge, huge, PositionSide::Long), None);
        assert_eq!(realized_pnl(Decimal::MIN, Decimal::MAX, Decimal::ONE, PositionSide::Long), None);
    }

    #[test]
    fn test_accumulate_saturates() {
        let big = dec!(50000000000000000000000000000);
        assert_eq!(accumulate(big, big), Decimal::MAX);
        assert_eq!(accumulate(-big, -big), Decimal::MIN);
        assert_eq!(accumulate(dec!(1.5), dec!(-0.5)), dec!(1));
    }
}
