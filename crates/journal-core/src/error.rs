//! 매매일지의 에러 타입.
//!
//! 이 모듈은 매매일지 전반에서 사용되는 에러 타입을 정의합니다.
//! 캘린더 집계 로직 자체는 에러를 내지 않으며, 여기 정의된 에러는
//! 주로 외부 API 호출과 설정 로딩 경계에서 발생합니다.

use thiserror::Error;

/// 핵심 매매일지 에러.
#[derive(Debug, Error)]
pub enum JournalError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 타임아웃
    #[error("요청 타임아웃: {0}")]
    Timeout(String),

    /// API 응답 에러
    #[error("API 에러 {code}: {message}")]
    Api { code: u16, message: String },

    /// 인증 에러
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 응답 파싱 에러
    #[error("파싱 에러: {0}")]
    Parse(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 매매일지 작업을 위한 Result 타입.
pub type JournalResult<T> = Result<T, JournalError>;

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Parse(err.to_string())
    }
}

impl From<config::ConfigError> for JournalError {
    fn from(err: config::ConfigError) -> Self {
        JournalError::Config(err.to_string())
    }
}
