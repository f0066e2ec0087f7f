//! CLI 명령어 구현 모듈.

pub mod calendar;
pub mod day;
pub mod render;
pub mod replay;
pub mod size;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use journal_calendar::CalendarMonth;
use journal_core::SettlementZone;

/// 연/월 인자로 표시할 월을 정합니다. 빠진 값은 오늘 기준으로 채웁니다.
///
/// `month`는 1~12입니다.
pub fn resolve_month(
    year: Option<i32>,
    month: Option<u32>,
    zone: &SettlementZone,
) -> Result<CalendarMonth> {
    let today = CalendarMonth::from_date(zone.today());
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.number());

    CalendarMonth::from_ym(year, month)
        .with_context(|| format!("Invalid month: {}. Use 1-12", month))
}

/// `YYYY-MM-DD` 날짜 인자를 파싱합니다.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Use YYYY-MM-DD", s))
}
