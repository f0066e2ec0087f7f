//! 비동기 캘린더 컨트롤러.
//!
//! [`CalendarState`]와 [`TradeSummarySource`]를 묶어 월 이동, 새로고침,
//! 실시간 이벤트 처리를 수행합니다. 상태 잠금은 조회 대기 중에 잡지 않습니다.
//! 티켓 발급과 결과 반영만 잠금 구간 안에서 일어납니다.

use std::sync::Arc;

use chrono::NaiveDate;
use journal_core::{calendar_span, SettlementZone};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, Instrument};

use crate::aggregate::load_month;
use crate::live::LiveTradeEvent;
use crate::month::CalendarMonth;
use crate::source::TradeSummarySource;
use crate::state::{CalendarSnapshot, CalendarState, FetchTicket, LiveOutcome};

/// 날짜 셀 선택 콜백. `YYYY-MM-DD` 문자열을 받습니다.
pub type DaySelectHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// 캘린더 컨트롤러.
pub struct CalendarController<S> {
    source: Arc<S>,
    state: Arc<Mutex<CalendarState>>,
    on_day_select: Option<DaySelectHandler>,
}

impl<S> Clone for CalendarController<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            on_day_select: self.on_day_select.clone(),
        }
    }
}

impl<S: TradeSummarySource + 'static> CalendarController<S> {
    /// 새 컨트롤러를 생성합니다. 첫 조회는 [`refresh`](Self::refresh)로 시작합니다.
    pub fn new(source: S, state: CalendarState) -> Self {
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(state)),
            on_day_select: None,
        }
    }

    /// 날짜 선택 콜백을 설정합니다.
    pub fn with_day_select(mut self, handler: DaySelectHandler) -> Self {
        self.on_day_select = Some(handler);
        self
    }

    /// 현재 표시 월을 다시 조회합니다.
    ///
    /// 반영되었으면 `true`, 더 새로운 조회에 밀려 버려졌으면 `false`.
    pub async fn refresh(&self) -> bool {
        let (ticket, zone) = {
            let mut state = self.state.lock().await;
            (state.begin_fetch(), *state.zone())
        };

        self.fetch(ticket, zone).await
    }

    /// 다른 월로 이동하고 조회합니다.
    pub async fn navigate(&self, month: CalendarMonth) -> bool {
        let (ticket, zone) = {
            let mut state = self.state.lock().await;
            (state.navigate(month), *state.zone())
        };
        info!(month = %month, "Calendar navigated");

        self.fetch(ticket, zone).await
    }

    async fn fetch(&self, ticket: FetchTicket, zone: SettlementZone) -> bool {
        let span = calendar_span!("calendar_fetch", ticket.month(), ticket.seq());
        let days = load_month(self.source.as_ref(), ticket.month(), &zone)
            .instrument(span)
            .await;

        self.state.lock().await.commit(ticket, days)
    }

    /// 다음 월로 이동합니다.
    pub async fn next_month(&self) -> bool {
        let next = self.state.lock().await.month().next();
        self.navigate(next).await
    }

    /// 이전 월로 이동합니다.
    pub async fn prev_month(&self) -> bool {
        let prev = self.state.lock().await.month().prev();
        self.navigate(prev).await
    }

    /// 실시간 이벤트를 처리합니다. 필요하면 표시 월을 재조회합니다.
    pub async fn handle_live(&self, event: LiveTradeEvent) -> LiveOutcome {
        let outcome = self.state.lock().await.apply_live(&event);

        if outcome == LiveOutcome::RefetchRequired {
            debug!("Live event requires refetch of visible month");
            self.refresh().await;
        }

        outcome
    }

    /// 날짜 셀이 선택되었을 때 호출합니다.
    pub fn select_day(&self, date: NaiveDate) {
        let key = date.format("%Y-%m-%d").to_string();
        match &self.on_day_select {
            Some(handler) => handler(&key),
            None => debug!(date = %key, "Day selected without handler"),
        }
    }

    /// 현재 상태의 스냅샷.
    pub async fn snapshot(&self) -> CalendarSnapshot {
        self.state.lock().await.snapshot()
    }

    /// 현재 표시 월.
    pub async fn month(&self) -> CalendarMonth {
        self.state.lock().await.month()
    }

    /// 실시간 이벤트 채널을 소비하는 태스크를 시작합니다.
    ///
    /// 송신측이 모두 닫히면 태스크가 종료됩니다.
    pub fn spawn_live_listener(&self, mut rx: mpsc::Receiver<LiveTradeEvent>) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let outcome = controller.handle_live(event).await;
                debug!(?outcome, "Live event handled");
            }
            info!("Live event channel closed");
        })
    }
}
