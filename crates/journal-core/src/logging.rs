//! tracing 기반 로깅 초기화.
//!
//! 로그는 stderr로만 나가고 stdout은 CLI 출력이 사용합니다.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::error::{JournalError, JournalResult};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Pretty,
    Json,
    #[default]
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 구독자 설정. 설정 파일의 `[logging]` 섹션에서 만들어집니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// 필터 지시문 (예: "info", "journal_calendar=debug")
    pub level: String,
    pub format: LogFormat,
}

impl From<&LoggingConfig> for LogConfig {
    /// 알 수 없는 형식은 compact로 대체합니다.
    fn from(cfg: &LoggingConfig) -> Self {
        Self {
            level: cfg.level.clone(),
            format: cfg.format.parse().unwrap_or_default(),
        }
    }
}

/// 전역 구독자를 설치합니다. `RUST_LOG`가 있으면 `config.level`보다 우선합니다.
pub fn init_logging(config: LogConfig) -> JournalResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| JournalError::Config(format!("log filter `{}`: {}", config.level, e)))?;

    let base = fmt::layer().with_writer(std::io::stderr);
    let layer = match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| JournalError::Config(e.to_string()))?;

    tracing::debug!(format = ?config.format, level = %config.level, "Logging initialized");
    Ok(())
}

/// 캘린더 월 필드가 붙은 span.
#[macro_export]
macro_rules! calendar_span {
    ($name:expr, $month:expr) => {
        tracing::info_span!($name, month = %$month)
    };
    ($name:expr, $month:expr, $seq:expr) => {
        tracing::info_span!($name, month = %$month, seq = $seq)
    };
}
