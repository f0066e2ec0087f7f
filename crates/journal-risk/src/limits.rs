//! 일일 손실 한도 점검.
//!
//! 하루의 실현 손익을 정책의 일일 손실 한도와 비교합니다.
//! 손실이 한도와 같아지는 순간부터 초과로 봅니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::policy::RiskPolicy;

/// 일일 손실 한도 상태.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DailyLossStatus {
    /// 한도 이내
    Within {
        /// 한도까지 남은 손실 여유 (양수)
        remaining: Decimal,
    },
    /// 한도 도달/초과
    Breached {
        /// 실제 손실 (양수)
        loss: Decimal,
        /// 손실 한도 (양수)
        limit: Decimal,
    },
}

impl DailyLossStatus {
    /// 한도를 초과했는지.
    pub fn is_breached(&self) -> bool {
        matches!(self, Self::Breached { .. })
    }
}

impl RiskPolicy {
    /// 하루 실현 손익을 일일 손실 한도와 비교합니다.
    pub fn check_day(&self, day_pnl: Decimal) -> DailyLossStatus {
        let limit = self.daily_loss_limit();
        let loss = if day_pnl < Decimal::ZERO {
            -day_pnl
        } else {
            Decimal::ZERO
        };

        if loss >= limit && !limit.is_zero() {
            warn!(loss = %loss, limit = %limit, "Daily loss limit breached");
            DailyLossStatus::Breached { loss, limit }
        } else {
            DailyLossStatus::Within {
                remaining: (limit - loss).max(Decimal::ZERO),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_check_day() {
        let policy = RiskPolicy::new(dec!(10000), dec!(1), dec!(3)).unwrap();

        assert_eq!(
            policy.check_day(dec!(150)),
            DailyLossStatus::Within {
                remaining: dec!(300)
            }
        );
        assert_eq!(
            policy.check_day(dec!(-120.5)),
            DailyLossStatus::Within {
                remaining: dec!(179.5)
            }
        );

        let status = policy.check_day(dec!(-300));
        assert!(status.is_breached());
        assert_eq!(
            status,
            DailyLossStatus::Breached {
                loss: dec!(300),
                limit: dec!(300)
            }
        );
    }

    #[test]
    fn test_zero_budget_never_breaches() {
        let policy = RiskPolicy::new(Decimal::ZERO, dec!(1), dec!(3)).unwrap();
        assert!(!policy.check_day(dec!(-50)).is_breached());
    }
}
