//! 캘린더 화면 상태.
//!
//! 표시 중인 월, 일별 집계 맵, 로딩 플래그를 호출자가 소유하는
//! 명시적 상태로 관리합니다. 모든 쓰기는 `&mut self`로 직렬화됩니다.
//!
//! # 조회 순서 보장
//!
//! 조회를 시작할 때마다 순번이 붙은 [`FetchTicket`]을 발급합니다.
//! 조회 결과는 가장 최근에 발급된 티켓이고 대상 월이 현재 표시 월과
//! 같을 때만 반영됩니다. 늦게 도착한 이전 응답과 다른 월로 이동한 뒤
//! 도착한 응답은 조용히 버립니다.

use chrono::NaiveDate;
use journal_core::SettlementZone;
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::{DayAggregate, DayMap};
use crate::live::LiveTradeEvent;
use crate::month::CalendarMonth;
use crate::patch::patch_day;
use crate::summary::MonthSummary;

/// 월 조회 요청 티켓.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    month: CalendarMonth,
}

impl FetchTicket {
    /// 발급 순번.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// 조회 대상 월.
    pub fn month(&self) -> CalendarMonth {
        self.month
    }
}

/// 실시간 이벤트 처리 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveOutcome {
    /// 해당 날짜를 낙관적으로 갱신함
    Patched(NaiveDate),
    /// 표시 월 전체를 다시 조회해야 함
    RefetchRequired,
}

/// 화면 표시용 스냅샷.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSnapshot {
    pub month: String,
    pub loading: bool,
    pub days: DayMap,
    pub summary: MonthSummary,
}

/// 캘린더 상태.
#[derive(Debug, Clone)]
pub struct CalendarState {
    month: CalendarMonth,
    days: DayMap,
    loading: bool,
    seq: u64,
    zone: SettlementZone,
}

impl CalendarState {
    /// 표시할 월과 결제일 시간대로 빈 상태를 생성합니다.
    pub fn new(month: CalendarMonth, zone: SettlementZone) -> Self {
        Self {
            month,
            days: DayMap::new(),
            loading: false,
            seq: 0,
            zone,
        }
    }

    /// 현재 표시 월.
    pub fn month(&self) -> CalendarMonth {
        self.month
    }

    /// 현재 일별 집계.
    pub fn days(&self) -> &DayMap {
        &self.days
    }

    /// 특정 날짜의 집계.
    pub fn day(&self, date: NaiveDate) -> Option<&DayAggregate> {
        self.days.get(&date)
    }

    /// 조회가 진행 중인지.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 결제일 시간대.
    pub fn zone(&self) -> &SettlementZone {
        &self.zone
    }

    /// 현재 표시 월의 조회를 시작합니다.
    ///
    /// 이전에 발급된 티켓은 모두 무효가 됩니다.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.seq += 1;
        self.loading = true;
        debug!(month = %self.month, seq = self.seq, "Month fetch started");
        FetchTicket {
            seq: self.seq,
            month: self.month,
        }
    }

    /// 다른 월로 이동하고 그 월의 조회를 시작합니다.
    pub fn navigate(&mut self, month: CalendarMonth) -> FetchTicket {
        if month != self.month {
            self.month = month;
            self.days = DayMap::new();
        }
        self.begin_fetch()
    }

    /// 조회 결과를 반영합니다.
    ///
    /// 오래된 티켓이거나 대상 월이 현재 표시 월과 다르면 버리고 `false`.
    pub fn commit(&mut self, ticket: FetchTicket, days: DayMap) -> bool {
        if ticket.seq != self.seq || ticket.month != self.month {
            debug!(
                ticket_seq = ticket.seq,
                current_seq = self.seq,
                ticket_month = %ticket.month,
                visible_month = %self.month,
                "Stale month fetch discarded"
            );
            return false;
        }

        info!(month = %self.month, days = days.len(), "Month aggregates committed");
        self.days = days;
        self.loading = false;
        true
    }

    /// 실시간 이벤트를 처리합니다.
    ///
    /// 표시 월(연도 포함)에 결제된 전체 거래만 낙관적으로 패치하고,
    /// 날짜 힌트나 다른 월의 거래는 재조회를 요구합니다.
    pub fn apply_live(&mut self, event: &LiveTradeEvent) -> LiveOutcome {
        let trade = match event {
            LiveTradeEvent::Closed(trade) => trade,
            LiveTradeEvent::DateHint { date_iso } => {
                debug!(date_iso = %date_iso, "Live date hint received");
                return LiveOutcome::RefetchRequired;
            }
        };

        let Some(date) = trade.settlement_date(&self.zone) else {
            return LiveOutcome::RefetchRequired;
        };
        if !self.month.contains(date) {
            return LiveOutcome::RefetchRequired;
        }

        let days = std::mem::take(&mut self.days);
        self.days = patch_day(days, trade, self.month.index(), &self.zone);
        LiveOutcome::Patched(date)
    }

    /// 월간 요약.
    pub fn summary(&self) -> MonthSummary {
        MonthSummary::from_days(&self.days)
    }

    /// 화면 표시용 스냅샷.
    pub fn snapshot(&self) -> CalendarSnapshot {
        CalendarSnapshot {
            month: self.month.to_string(),
            loading: self.loading,
            days: self.days.clone(),
            summary: self.summary(),
        }
    }
}
