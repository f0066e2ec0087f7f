//! 거래 요약 조회 추상화.
//!
//! 캘린더는 거래 데이터를 직접 저장하지 않고, 날짜 범위를 받아
//! 거래 레코드 목록을 돌려주는 외부 협력자에게 요청합니다.
//! REST 구현은 `journal-client` 크레이트에 있습니다.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use journal_core::{JournalResult, SettlementZone, TradeRecord};

/// 날짜 범위의 거래 요약을 조회하는 협력자.
#[async_trait]
pub trait TradeSummarySource: Send + Sync {
    /// `from`~`to` (양 끝 포함) 사이에 결제된 거래를 조회합니다.
    async fn fetch_trades(&self, from: NaiveDate, to: NaiveDate)
        -> JournalResult<Vec<TradeRecord>>;
}

#[async_trait]
impl<T: TradeSummarySource + ?Sized> TradeSummarySource for Arc<T> {
    async fn fetch_trades(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> JournalResult<Vec<TradeRecord>> {
        (**self).fetch_trades(from, to).await
    }
}

/// 메모리에 보관한 거래 목록에서 조회하는 소스.
///
/// 오프라인 재생(파일 내보내기)과 테스트에 사용합니다.
/// 결제일을 알 수 없는 거래는 어떤 범위에도 포함되지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct StaticTradeSource {
    trades: Vec<TradeRecord>,
    zone: SettlementZone,
}

impl StaticTradeSource {
    /// 거래 목록과 결제일 시간대로 생성합니다.
    pub fn new(trades: Vec<TradeRecord>, zone: SettlementZone) -> Self {
        Self { trades, zone }
    }

    /// 보관 중인 전체 거래.
    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }
}

#[async_trait]
impl TradeSummarySource for StaticTradeSource {
    async fn fetch_trades(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> JournalResult<Vec<TradeRecord>> {
        Ok(self
            .trades
            .iter()
            .filter(|t| {
                t.settlement_date(&self.zone)
                    .is_some_and(|d| d >= from && d <= to)
            })
            .cloned()
            .collect())
    }
}
