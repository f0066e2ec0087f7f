//! 하루 집계와 일일 손실 한도 조회.

use anyhow::Result;
use chrono::NaiveDate;
use journal_calendar::{
    CalendarController, CalendarMonth, CalendarState, DayAggregate, TradeSummarySource,
};
use journal_core::SettlementZone;
use journal_risk::{DailyLossStatus, RiskPolicy};
use rust_decimal::Decimal;
use serde::Serialize;

use super::render::{render_day, OutputFormat};

/// 하루 보고서.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayReport {
    pub date: NaiveDate,
    pub day: Option<DayAggregate>,
    pub daily_loss: DailyLossStatus,
}

/// 날짜가 속한 월을 조회해서 그 날의 보고서를 만듭니다.
pub async fn day_report<S>(
    source: S,
    zone: SettlementZone,
    date: NaiveDate,
    policy: &RiskPolicy,
) -> DayReport
where
    S: TradeSummarySource + 'static,
{
    let month = CalendarMonth::from_date(date);
    let controller = CalendarController::new(source, CalendarState::new(month, zone));
    controller.refresh().await;

    let day = controller.snapshot().await.days.get(&date).cloned();
    let pnl = day.as_ref().map_or(Decimal::ZERO, |d| d.pnl);

    DayReport {
        date,
        daily_loss: policy.check_day(pnl),
        day,
    }
}

/// 하루 보고서를 출력 문자열로 만듭니다.
pub async fn run_day<S>(
    source: S,
    zone: SettlementZone,
    date: NaiveDate,
    policy: &RiskPolicy,
    format: OutputFormat,
) -> Result<String>
where
    S: TradeSummarySource + 'static,
{
    let report = day_report(source, zone, date, policy).await;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => render_day(report.date, report.day.as_ref(), &report.daily_loss),
    }
}
