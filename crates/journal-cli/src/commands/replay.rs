//! 내보낸 거래 파일의 오프라인 재생.
//!
//! API 없이 로컬 JSON 내보내기(배열 또는 페이지네이션 객체)로 월 캘린더를
//! 만들고, 선택적으로 실시간 이벤트 파일을 순서대로 적용합니다.

use std::path::Path;

use anyhow::{Context, Result};
use journal_calendar::{
    CalendarController, CalendarMonth, CalendarState, LiveOutcome, LiveTradeEvent,
    StaticTradeSource,
};
use journal_client::parse_trade_list;
use journal_core::{SettlementZone, TradeRecord};
use serde_json::Value;
use tracing::{info, warn};

use super::calendar::render_snapshot;
use super::render::OutputFormat;

/// 재생 설정.
#[derive(Debug)]
pub struct ReplayConfig<'a> {
    /// 거래 내보내기 파일
    pub trades_path: &'a Path,
    /// 실시간 이벤트 파일 (JSON 배열)
    pub events_path: Option<&'a Path>,
    /// 표시할 월 (없으면 마지막 결제일의 월)
    pub month: Option<CalendarMonth>,
    pub zone: SettlementZone,
    pub format: OutputFormat,
}

/// 거래 내보내기 파일을 읽습니다.
pub fn load_export(path: &Path) -> Result<Vec<TradeRecord>> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trade export: {}", path.display()))?;
    Ok(parse_trade_list(&body)?)
}

/// 실시간 이벤트 파일을 읽습니다. 객체가 아닌 항목은 건너뜁니다.
pub fn load_events(path: &Path) -> Result<Vec<LiveTradeEvent>> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file: {}", path.display()))?;
    let values: Vec<Value> = serde_json::from_str(&body)
        .with_context(|| format!("Event file must be a JSON array: {}", path.display()))?;

    let total = values.len();
    let events: Vec<LiveTradeEvent> = values
        .into_iter()
        .filter_map(LiveTradeEvent::from_value)
        .collect();
    if events.len() < total {
        warn!(skipped = total - events.len(), "Unreadable live events skipped");
    }
    Ok(events)
}

/// 가장 늦은 결제일이 속한 월. 결제일이 하나도 없으면 오늘의 월.
pub fn latest_month(trades: &[TradeRecord], zone: &SettlementZone) -> CalendarMonth {
    trades
        .iter()
        .filter_map(|t| t.settlement_date(zone))
        .max()
        .map(CalendarMonth::from_date)
        .unwrap_or_else(|| CalendarMonth::from_date(zone.today()))
}

/// 파일을 재생해서 출력 문자열을 만듭니다.
pub async fn run_replay(config: ReplayConfig<'_>) -> Result<String> {
    let trades = load_export(config.trades_path)?;
    let events = match config.events_path {
        Some(path) => load_events(path)?,
        None => Vec::new(),
    };

    let month = config
        .month
        .unwrap_or_else(|| latest_month(&trades, &config.zone));
    info!(
        trades = trades.len(),
        events = events.len(),
        month = %month,
        "Replaying trade export"
    );

    let source = StaticTradeSource::new(trades, config.zone);
    let controller = CalendarController::new(source, CalendarState::new(month, config.zone));
    controller.refresh().await;

    let (mut patched, mut refetched) = (0usize, 0usize);
    for event in events {
        match controller.handle_live(event).await {
            LiveOutcome::Patched(_) => patched += 1,
            LiveOutcome::RefetchRequired => refetched += 1,
        }
    }
    if patched + refetched > 0 {
        info!(patched, refetched, "Live events applied");
    }

    let snapshot = controller.snapshot().await;
    render_snapshot(month, &snapshot, config.format)
}
