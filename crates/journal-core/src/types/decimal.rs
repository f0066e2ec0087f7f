//! 정밀한 금융 계산을 위한 Decimal 유틸리티.
//!
//! 손익과 R-multiple은 모두 소수점 2자리로 반올림해서 보관합니다.
//! 반올림 규칙은 집계기와 낙관적 패치가 반드시 공유해야 하므로
//! 이 모듈 한 곳에서만 정의합니다.

use rust_decimal::{Decimal, RoundingStrategy};

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 포지션 수량 타입.
pub type Quantity = Decimal;

/// 퍼센트 타입 (65.5 = 65.5%).
pub type Percentage = Decimal;

/// 금액/통계값 표시 자릿수.
pub const CENT_DP: u32 = 2;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 소수점 2자리로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_cents(&self) -> Decimal;

    /// 가장 가까운 정수로 반올림합니다.
    fn round_whole(&self) -> Decimal;

    /// 퍼센트 문자열로 변환합니다 (예: 65.5 -> "65.50%").
    fn to_percentage_string(&self) -> String;
}

impl DecimalExt for Decimal {
    fn round_cents(&self) -> Decimal {
        self.round_dp_with_strategy(CENT_DP, RoundingStrategy::MidpointAwayFromZero)
    }

    fn round_whole(&self) -> Decimal {
        self.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_percentage_string(&self) -> String {
        format!("{:.2}%", self)
    }
}
