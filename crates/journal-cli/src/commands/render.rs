//! 터미널 출력 형식.

use std::fmt::Write;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use journal_calendar::{CalendarMonth, DayAggregate, DayMap, MonthSummary};
use journal_core::DecimalExt;
use journal_risk::DailyLossStatus;
use rust_decimal::Decimal;

/// 한 칸의 너비.
const CELL: usize = 10;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: table, json", s)),
        }
    }
}

/// 부호가 붙은 소수점 2자리 손익 문자열.
pub fn format_pnl(pnl: Decimal) -> String {
    let pnl = pnl.round_cents();
    if pnl > Decimal::ZERO {
        format!("+{:.2}", pnl)
    } else {
        format!("{:.2}", pnl)
    }
}

/// 월 달력 격자 (일요일 시작).
///
/// 각 주는 날짜 줄과 손익 줄 두 줄로 출력합니다. 거래가 없는 날은 손익 칸이 비어 있습니다.
pub fn render_grid(month: CalendarMonth, days: &DayMap) -> Result<String> {
    let mut out = String::new();
    let width = CELL * 7;
    writeln!(out, "{:^width$}", month.to_string())?;

    for name in WEEKDAYS {
        write!(out, "{:>CELL$}", name)?;
    }
    out.push('\n');

    let lead = month.first_day().weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    cells.extend(month.first_day().iter_days().take(month.days_in_month() as usize).map(Some));

    for week in cells.chunks(7) {
        let mut dates = String::new();
        let mut pnls = String::new();
        for cell in week {
            match cell {
                Some(date) => {
                    write!(dates, "{:>CELL$}", date.day())?;
                    let pnl = days.get(date).map(|d| format_pnl(d.pnl)).unwrap_or_default();
                    write!(pnls, "{:>CELL$}", pnl)?;
                }
                None => {
                    write!(dates, "{:>CELL$}", "")?;
                    write!(pnls, "{:>CELL$}", "")?;
                }
            }
        }
        writeln!(out, "{}", dates.trim_end())?;
        writeln!(out, "{}", pnls.trim_end())?;
    }

    Ok(out)
}

/// 월간 요약 블록.
pub fn render_summary(summary: &MonthSummary) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "월 손익:     {}", format_pnl(summary.total_pnl))?;
    writeln!(
        out,
        "거래:        {} 건 / {} 일",
        summary.total_trades, summary.trading_days
    )?;
    writeln!(
        out,
        "수익일/손실일: {} / {}",
        summary.green_days, summary.red_days
    )?;
    writeln!(out, "승률:        {}", summary.win_rate.to_percentage_string())?;
    if let Some(best) = summary.best_day {
        writeln!(out, "최고의 날:   {} ({})", best.date, format_pnl(best.pnl))?;
    }
    if let Some(worst) = summary.worst_day {
        writeln!(out, "최악의 날:   {} ({})", worst.date, format_pnl(worst.pnl))?;
    }
    Ok(out)
}

/// 하루 집계 블록.
pub fn render_day(
    date: NaiveDate,
    day: Option<&DayAggregate>,
    status: &DailyLossStatus,
) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", date.format("%Y-%m-%d"))?;

    match day {
        Some(day) => {
            writeln!(out, "손익:   {}", format_pnl(day.pnl))?;
            writeln!(
                out,
                "거래:   {} 건 (승률 {})",
                day.trades,
                day.win_rate.round_cents().to_percentage_string()
            )?;
            writeln!(
                out,
                "R:      평균 {} / 최고 {} / 최저 {}",
                day.avg_r, day.best_r, day.worst_r
            )?;
        }
        None => {
            writeln!(out, "거래 없음")?;
        }
    }

    match status {
        DailyLossStatus::Within { remaining } => {
            writeln!(out, "일일 손실 한도: 여유 {:.2}", remaining)?;
        }
        DailyLossStatus::Breached { loss, limit } => {
            writeln!(out, "일일 손실 한도 초과: 손실 {:.2} / 한도 {:.2}", loss, limit)?;
        }
    }
    Ok(out)
}
