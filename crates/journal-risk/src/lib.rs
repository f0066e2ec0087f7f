//! 리스크 정책 모듈.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 예산 대비 리스크 정책 (거래당 리스크 %, 일일 손실 한도 %)
//! - 손절가 기반 포지션 사이징
//! - R-multiple 계산
//! - 일일 손실 한도 점검
//!
//! # 예제
//!
//! ```rust
//! use journal_risk::{PositionSizer, RiskPolicy};
//! use rust_decimal_macros::dec;
//!
//! let policy = RiskPolicy::new(dec!(10000), dec!(1), dec!(3)).unwrap();
//! let sizer = PositionSizer::new(policy);
//!
//! // 100 리스크 / (50 - 48) = 50주
//! assert_eq!(sizer.position_size(dec!(50), dec!(48)), dec!(50));
//! ```

pub mod limits;
pub mod policy;
pub mod position_sizing;

// 주요 타입 재내보내기
pub use limits::DailyLossStatus;
pub use policy::{PolicyValidationError, RiskPolicy};
pub use position_sizing::{r_multiple, PositionSizer, SizingPlan};
