//! REST 클라이언트 에러 타입.

use journal_core::JournalError;
use thiserror::Error;

/// 매매일지 API 호출 에러.
#[derive(Debug, Error)]
pub enum ClientError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 인증/권한 에러
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 요청 한도 초과
    #[error("Rate limit exceeded")]
    RateLimited,

    /// API 에러 코드
    #[error("API error {code}: {message}")]
    ApiError { code: u16, message: String },

    /// 파싱/역직렬화 에러
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 잘못된 클라이언트 설정
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl ClientError {
    /// HTTP 상태 코드와 응답 본문으로 에러를 분류합니다.
    pub fn from_status(code: u16, body: String) -> Self {
        match code {
            401 | 403 => ClientError::Unauthorized(body),
            429 => ClientError::RateLimited,
            _ => ClientError::ApiError {
                code,
                message: body,
            },
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::ParseError(err.to_string())
        } else {
            ClientError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::ParseError(err.to_string())
    }
}

impl From<ClientError> for JournalError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NetworkError(msg) => JournalError::Network(msg),
            ClientError::Unauthorized(msg) => JournalError::Auth(msg),
            ClientError::RateLimited => JournalError::Api {
                code: 429,
                message: "rate limit exceeded".to_string(),
            },
            ClientError::ApiError { code, message } => JournalError::Api { code, message },
            ClientError::ParseError(msg) => JournalError::Parse(msg),
            ClientError::InvalidConfig(msg) => JournalError::Config(msg),
            ClientError::Timeout(msg) => JournalError::Timeout(msg),
        }
    }
}
