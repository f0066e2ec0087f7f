//! 결제일 계산.
//!
//! 거래는 결제 시각의 "벽시계 날짜"로 일별 집계에 귀속됩니다.
//! UTC 날짜가 아니라 표시 시간대의 로컬 날짜를 사용하므로,
//! 자정 근처에 청산된 거래는 시간대에 따라 다른 날로 잡힐 수 있습니다.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// 오프셋이 없는 타임스탬프 형식 (이미 벽시계 시각으로 간주).
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// 결제일 계산에 사용할 시간대.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettlementZone {
    /// 시스템 로컬 시간대
    #[default]
    Local,
    /// IANA 이름으로 지정한 시간대 (예: "Asia/Seoul")
    Named(Tz),
}

impl SettlementZone {
    /// IANA 시간대 이름으로 생성합니다.
    pub fn named(name: &str) -> Option<Self> {
        name.parse::<Tz>().ok().map(Self::Named)
    }

    /// UTC 시간대.
    pub fn utc() -> Self {
        Self::Named(Tz::UTC)
    }

    /// 타임스탬프 문자열을 이 시간대의 로컬 날짜로 변환합니다.
    ///
    /// 허용 형식:
    /// - RFC 3339 (`2025-01-01T10:00:00Z`, `2025-01-01T10:00:00+09:00`)
    /// - 오프셋 없는 날짜시각 (`2025-01-01T10:00:00`) - 벽시계 그대로
    /// - 날짜만 (`2025-01-01`) - 그 날짜 그대로
    pub fn date_of(&self, timestamp: &str) -> Option<NaiveDate> {
        let ts = timestamp.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
            return Some(self.localize(&dt));
        }

        for fmt in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(ts, fmt) {
                return Some(naive.date());
            }
        }

        NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok()
    }

    /// 이 시간대 기준 오늘 날짜.
    pub fn today(&self) -> NaiveDate {
        match self {
            Self::Local => Local::now().date_naive(),
            Self::Named(tz) => chrono::Utc::now().with_timezone(tz).date_naive(),
        }
    }

    fn localize(&self, dt: &DateTime<FixedOffset>) -> NaiveDate {
        match self {
            Self::Local => dt.with_timezone(&Local).date_naive(),
            Self::Named(tz) => tz.from_utc_datetime(&dt.naive_utc()).date_naive(),
        }
    }
}

impl std::fmt::Display for SettlementZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}
