//! 설정 관리.
//!
//! 설정은 TOML 파일과 `JOURNAL__` 접두사 환경 변수에서 로드합니다.
//! 예: `JOURNAL__API__BASE_URL=https://journal.example.com/api`

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::domain::SettlementZone;
use crate::error::{JournalError, JournalResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JournalConfig {
    /// 매매일지 REST API 설정
    #[serde(default)]
    pub api: ApiConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 캘린더 설정
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// 리스크 정책 설정
    #[serde(default)]
    pub risk: RiskConfig,
}

/// REST API 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API 기본 URL (예: "http://127.0.0.1:3000/api/v1")
    pub base_url: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer 토큰 (선택). 빈 문자열은 없음으로 취급합니다.
    #[serde(default, skip_serializing, deserialize_with = "deserialize_token")]
    pub token: Option<SecretString>,
}

fn deserialize_token<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let token = Option::<String>::deserialize(deserializer)?;
    Ok(token
        .filter(|t| !t.trim().is_empty())
        .map(SecretString::from))
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api/v1".to_string(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// 캘린더 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CalendarConfig {
    /// 결제일 계산 시간대 (IANA 이름, 없으면 시스템 로컬)
    #[serde(default)]
    pub timezone: Option<String>,
}

impl CalendarConfig {
    /// 설정된 시간대를 해석합니다.
    pub fn zone(&self) -> JournalResult<SettlementZone> {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") | Some("local") => Ok(SettlementZone::Local),
            Some(name) => SettlementZone::named(name)
                .ok_or_else(|| JournalError::Config(format!("알 수 없는 시간대: {}", name))),
        }
    }
}

/// 리스크 정책 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RiskConfig {
    /// 운용 예산 (계좌 기준 금액)
    pub account_budget: Decimal,
    /// 거래당 리스크 (예산 대비 %)
    pub risk_per_trade_pct: Decimal,
    /// 최대 일일 손실 (예산 대비 %)
    pub max_daily_loss_pct: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            account_budget: dec!(10000),
            risk_per_trade_pct: dec!(1),
            max_daily_loss_pct: dec!(3),
        }
    }
}

impl JournalConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// 파일이 없으면 기본값과 환경 변수만으로 설정을 로드합니다.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    fn builder(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        let api = ApiConfig::default();
        let logging = LoggingConfig::default();

        config::Config::builder()
            .set_default("api.base_url", api.base_url)?
            .set_default("api.timeout_secs", api.timeout_secs as i64)?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format)
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("JOURNAL")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
