//! 리스크 정책.
//!
//! 정책은 세 값으로 구성됩니다: 운용 예산, 거래당 리스크 비율,
//! 일일 최대 손실 비율. 비율은 모두 예산 대비 백분율입니다.

use journal_core::{DecimalExt, Percentage, RiskConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 예산 기반 리스크 정책.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    account_budget: Decimal,
    risk_per_trade_pct: Percentage,
    max_daily_loss_pct: Percentage,
}

impl RiskPolicy {
    /// 검증을 거쳐 새 정책을 생성합니다.
    pub fn new(
        account_budget: Decimal,
        risk_per_trade_pct: Percentage,
        max_daily_loss_pct: Percentage,
    ) -> Result<Self, PolicyValidationError> {
        let policy = Self {
            account_budget,
            risk_per_trade_pct,
            max_daily_loss_pct,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// 설정에서 정책을 생성합니다.
    pub fn from_config(config: &RiskConfig) -> Result<Self, PolicyValidationError> {
        Self::new(
            config.account_budget,
            config.risk_per_trade_pct,
            config.max_daily_loss_pct,
        )
    }

    /// 정책 값을 검증합니다.
    pub fn validate(&self) -> Result<(), PolicyValidationError> {
        if self.account_budget < Decimal::ZERO {
            return Err(PolicyValidationError::InvalidValue(
                "account_budget must not be negative".into(),
            ));
        }

        if self.risk_per_trade_pct <= Decimal::ZERO || self.risk_per_trade_pct > dec!(100) {
            return Err(PolicyValidationError::InvalidValue(
                "risk_per_trade_pct must be between 0 and 100".into(),
            ));
        }

        if self.max_daily_loss_pct <= Decimal::ZERO || self.max_daily_loss_pct > dec!(100) {
            return Err(PolicyValidationError::InvalidValue(
                "max_daily_loss_pct must be between 0 and 100".into(),
            ));
        }

        Ok(())
    }

    /// 운용 예산.
    pub fn account_budget(&self) -> Decimal {
        self.account_budget
    }

    /// 거래당 리스크 비율.
    pub fn risk_per_trade_pct(&self) -> Percentage {
        self.risk_per_trade_pct
    }

    /// 일일 최대 손실 비율.
    pub fn max_daily_loss_pct(&self) -> Percentage {
        self.max_daily_loss_pct
    }

    /// 거래당 허용 리스크 금액 (예산 × 리스크%).
    pub fn risk_amount(&self) -> Decimal {
        (self.account_budget * self.risk_per_trade_pct / dec!(100)).round_cents()
    }

    /// 일일 손실 한도 금액 (양수).
    pub fn daily_loss_limit(&self) -> Decimal {
        (self.account_budget * self.max_daily_loss_pct / dec!(100)).round_cents()
    }

    /// 금액이 예산의 몇 %인지 계산합니다. 예산이 0이면 0.
    pub fn budget_pct(&self, amount: Decimal) -> Percentage {
        if self.account_budget.is_zero() {
            return Decimal::ZERO;
        }
        (amount / self.account_budget * dec!(100)).round_cents()
    }
}

impl Default for RiskPolicy {
    fn default() -> Self {
        let config = RiskConfig::default();
        Self {
            account_budget: config.account_budget,
            risk_per_trade_pct: config.risk_per_trade_pct,
            max_daily_loss_pct: config.max_daily_loss_pct,
        }
    }
}

/// 정책 검증 오류.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PolicyValidationError {
    #[error("Invalid risk policy value: {0}")]
    InvalidValue(String),
}
