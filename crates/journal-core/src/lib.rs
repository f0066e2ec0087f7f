//! # Journal Core
//!
//! 매매일지의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 매매일지 전반에서 사용되는 기본 타입을 제공합니다:
//! - 거래 기록 (외부 API가 내려주는 관대한 형태의 레코드)
//! - 결제일(settlement date) 계산과 시간대 처리
//! - 손익 계산 공통 로직
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
