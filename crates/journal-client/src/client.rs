//! 매매일지 REST API 클라이언트.
//!
//! `GET {base_url}/trades/summary?from=YYYY-MM-DD&to=YYYY-MM-DD` 로
//! 날짜 범위의 거래 요약을 조회합니다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use journal_calendar::TradeSummarySource;
use journal_core::{ApiConfig, JournalResult, TradeRecord};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error};

use crate::error::ClientError;
use crate::types::parse_trade_list;

const SUMMARY_PATH: &str = "trades/summary";

/// REST 거래 요약 소스.
pub struct RestTradeSource {
    client: Client,
    base_url: String,
    token: Option<SecretString>,
}

impl std::fmt::Debug for RestTradeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTradeSource")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RestTradeSource {
    /// 기본 URL과 타임아웃으로 클라이언트를 생성합니다.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::InvalidConfig("empty base_url".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// API 설정에서 클라이언트를 생성합니다.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let source = Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))?;
        Ok(match &config.token {
            Some(token) => source.with_token(token.clone()),
            None => source,
        })
    }

    /// Bearer 토큰을 설정합니다.
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// 기본 URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 날짜 범위의 거래 요약을 조회합니다.
    pub async fn get_trade_summary(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TradeRecord>, ClientError> {
        let url = format!("{}/{}", self.base_url, SUMMARY_PATH);
        let from = from.format("%Y-%m-%d").to_string();
        let to = to.format("%Y-%m-%d").to_string();

        let mut request = self
            .client
            .get(&url)
            .query(&[("from", from.as_str()), ("to", to.as_str())]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Trade summary request failed: {} - {}", status, body);
            return Err(ClientError::from_status(status.as_u16(), body));
        }

        let trades = parse_trade_list(&body)?;
        debug!(from = %from, to = %to, trades = trades.len(), "Trade summary fetched");
        Ok(trades)
    }
}

#[async_trait]
impl TradeSummarySource for RestTradeSource {
    async fn fetch_trades(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> JournalResult<Vec<TradeRecord>> {
        Ok(self.get_trade_summary(from, to).await?)
    }
}
