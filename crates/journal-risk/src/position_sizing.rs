//! 손절가 기반 포지션 사이징.
//!
//! 제공 기능:
//! - 거래당 허용 리스크로 살 수 있는 최대 수량 계산
//! - 포지션 명목 가치의 예산 대비 비율 계산
//! - 진입/손절/청산가로부터 R-multiple 계산

use journal_core::{realized_pnl, DecimalExt, Percentage, PositionSide, Price, Quantity};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::policy::RiskPolicy;

/// 수량 소수점 자릿수 (절사).
const SIZE_DP: u32 = 4;

/// 포지션 사이징 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingPlan {
    /// 매수/매도 수량
    pub size: Quantity,
    /// 거래당 허용 리스크 금액
    pub risk_amount: Decimal,
    /// 진입가와 손절가의 거리
    pub stop_distance: Price,
    /// 포지션 명목 가치 (진입가 × 수량)
    pub notional: Decimal,
    /// 명목 가치의 예산 대비 비율
    pub notional_budget_pct: Percentage,
}

/// 리스크 정책 기반 포지션 사이저.
#[derive(Debug, Clone, Default)]
pub struct PositionSizer {
    policy: RiskPolicy,
}

impl PositionSizer {
    /// 주어진 정책으로 새 포지션 사이저를 생성.
    pub fn new(policy: RiskPolicy) -> Self {
        Self { policy }
    }

    /// 사용 중인 정책.
    pub fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    /// 손절 시 손실이 허용 리스크와 같아지는 수량.
    ///
    /// 진입가와 손절가가 같으면 0을 반환합니다.
    pub fn position_size(&self, entry: Price, stop: Price) -> Quantity {
        let distance = (entry - stop).abs();
        if distance.is_zero() {
            return Decimal::ZERO;
        }

        (self.policy.risk_amount() / distance)
            .round_dp_with_strategy(SIZE_DP, RoundingStrategy::ToZero)
    }

    /// 수량과 명목 가치를 포함한 사이징 계획.
    pub fn plan(&self, entry: Price, stop: Price) -> SizingPlan {
        let size = self.position_size(entry, stop);
        let notional = (entry * size).round_cents();
        let plan = SizingPlan {
            size,
            risk_amount: self.policy.risk_amount(),
            stop_distance: (entry - stop).abs(),
            notional,
            notional_budget_pct: self.policy.budget_pct(notional),
        };

        debug!(
            entry = %entry,
            stop = %stop,
            size = %plan.size,
            notional = %plan.notional,
            "Position sizing plan calculated"
        );

        plan
    }
}

/// R-multiple 계산.
///
/// 단위당 실현 손익을 진입가-손절가 거리로 나눈 값입니다.
/// 거리가 0이거나 계산이 `Decimal` 범위를 넘으면 `None`입니다.
///
/// ```
/// use journal_core::PositionSide;
/// use journal_risk::r_multiple;
/// use rust_decimal_macros::dec;
///
/// // 롱: 100 진입, 95 손절, 110 청산 → +2R
/// assert_eq!(r_multiple(PositionSide::Long, dec!(100), dec!(95), dec!(110)), Some(dec!(2)));
/// ```
pub fn r_multiple(side: PositionSide, entry: Price, stop: Price, exit: Price) -> Option<Decimal> {
    let risk_per_unit = (entry - stop).abs();
    if risk_per_unit.is_zero() {
        return None;
    }

    realized_pnl(entry, exit, Decimal::ONE, side)?
        .checked_div(risk_per_unit)
        .map(|r| r.round_cents())
}
