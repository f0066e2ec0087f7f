//! 월간 손익 캘린더 조회.

use anyhow::Result;
use journal_calendar::{
    CalendarController, CalendarMonth, CalendarSnapshot, CalendarState, TradeSummarySource,
};
use journal_core::SettlementZone;
use tracing::info;

use super::render::{render_grid, render_summary, OutputFormat};

/// 월 캘린더를 조회해서 출력 문자열을 만듭니다.
pub async fn run_calendar<S>(
    source: S,
    zone: SettlementZone,
    month: CalendarMonth,
    format: OutputFormat,
) -> Result<String>
where
    S: TradeSummarySource + 'static,
{
    let controller = CalendarController::new(source, CalendarState::new(month, zone));
    controller.refresh().await;

    let snapshot = controller.snapshot().await;
    info!(
        month = %snapshot.month,
        days = snapshot.days.len(),
        trades = snapshot.summary.total_trades,
        "Calendar loaded"
    );

    render_snapshot(month, &snapshot, format)
}

/// 스냅샷을 지정한 형식으로 출력합니다.
pub fn render_snapshot(
    month: CalendarMonth,
    snapshot: &CalendarSnapshot,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
        OutputFormat::Table => {
            let mut out = render_grid(month, &snapshot.days)?;
            out.push('\n');
            out.push_str(&render_summary(&snapshot.summary)?);
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_calendar::StaticTradeSource;
    use journal_core::TradeRecord;
    use rust_decimal_macros::dec;

    fn source() -> StaticTradeSource {
        StaticTradeSource::new(
            vec![
                TradeRecord::new()
                    .with_exit_time("2025-03-03T10:00:00Z")
                    .with_realized_pnl(dec!(80)),
                TradeRecord::new()
                    .with_exit_time("2025-03-04T10:00:00Z")
                    .with_realized_pnl(dec!(-30)),
                TradeRecord::new()
                    .with_exit_time("2025-04-01T10:00:00Z")
                    .with_realized_pnl(dec!(1000)),
            ],
            SettlementZone::utc(),
        )
    }

    #[tokio::test]
    async fn test_table_output() {
        let month = CalendarMonth::from_ym(2025, 3).unwrap();
        let out = run_calendar(source(), SettlementZone::utc(), month, OutputFormat::Table)
            .await
            .unwrap();

        assert!(out.contains("+80.00"));
        assert!(out.contains("-30.00"));
        assert!(out.contains("+50.00"));
        assert!(!out.contains("1000"));
    }

    #[tokio::test]
    async fn test_json_output() {
        let month = CalendarMonth::from_ym(2025, 3).unwrap();
        let out = run_calendar(source(), SettlementZone::utc(), month, OutputFormat::Json)
            .await
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["month"], "2025-03");
        assert_eq!(json["loading"], false);
        assert!(json["days"].get("2025-03-03").is_some());
        assert_eq!(json["summary"]["totalTrades"], 2);
    }
}
