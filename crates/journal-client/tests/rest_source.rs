//! REST 거래 요약 소스 통합 테스트 (mockito 서버 사용)

use std::time::Duration;

use chrono::NaiveDate;
use journal_calendar::{load_month, CalendarMonth, TradeSummarySource};
use journal_client::{ClientError, RestTradeSource};
use journal_core::{ApiConfig, JournalError, SettlementZone};
use mockito::Matcher;
use secrecy::SecretString;
use rust_decimal_macros::dec;

fn january() -> (NaiveDate, NaiveDate) {
    CalendarMonth::new(2025, 0).unwrap().range()
}

fn source(url: &str) -> RestTradeSource {
    RestTradeSource::new(url, Duration::from_secs(5)).unwrap()
}

fn range_query() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("from".into(), "2025-01-01".into()),
        Matcher::UrlEncoded("to".into(), "2025-01-31".into()),
    ])
}

#[tokio::test]
async fn test_fetch_bare_array() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/trades/summary")
        .match_query(range_query())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"exitTime": "2025-01-01T15:00:00Z", "side": "LONG",
                 "entryPrice": 10, "exitPrice": 11, "size": 100},
                {"exitTime": "2025-01-01T16:00:00Z", "side": "SHORT",
                 "entryPrice": "20", "exitPrice": "22", "size": "50"}
            ]"#,
        )
        .create_async()
        .await;

    let (from, to) = january();
    let trades = source(&server.url()).fetch_trades(from, to).await.unwrap();

    mock.assert_async().await;
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].realized_pnl(), dec!(100));
    assert_eq!(trades[1].realized_pnl(), dec!(-100));
}

#[tokio::test]
async fn test_fetch_paginated_with_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/trades/summary")
        .match_query(range_query())
        .match_header("authorization", "Bearer journal-token")
        .with_status(200)
        .with_body(r#"{"page": 1, "items": [{"exitTime": "2025-01-09", "realizedPnl": 42}]}"#)
        .create_async()
        .await;

    let config = ApiConfig {
        base_url: format!("{}/", server.url()),
        timeout_secs: 5,
        token: Some(SecretString::from("journal-token")),
    };
    let source = RestTradeSource::from_config(&config).unwrap();

    let (from, to) = january();
    let trades = source.get_trade_summary(from, to).await.unwrap();

    mock.assert_async().await;
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].realized_pnl(), dec!(42));
}

#[tokio::test]
async fn test_error_status_mapping() {
    let mut server = mockito::Server::new_async().await;
    let _unauthorized = server
        .mock("GET", "/trades/summary")
        .match_query(range_query())
        .with_status(401)
        .with_body("token expired")
        .create_async()
        .await;

    let (from, to) = january();
    let err = source(&server.url())
        .get_trade_summary(from, to)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));

    let err = source(&server.url()).fetch_trades(from, to).await.unwrap_err();
    assert!(matches!(err, JournalError::Auth(_)));
}

#[tokio::test]
async fn test_server_error_degrades_to_empty_month() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/trades/summary")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let days = load_month(
        &source(&server.url()),
        CalendarMonth::new(2025, 0).unwrap(),
        &SettlementZone::utc(),
    )
    .await;
    assert!(days.is_empty());
}

#[tokio::test]
async fn test_month_aggregated_from_api() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/trades/summary")
        .match_query(range_query())
        .with_status(200)
        .with_body(
            r#"{"data": [
                {"exitTime": "2025-01-03T10:00:00Z", "realizedPnl": 50, "rMultiple": 1},
                {"exitTime": "2025-01-03T11:00:00Z", "realizedPnl": -20, "rMultiple": -0.4},
                {"entryTime": "2025-01-04T09:00:00Z", "realizedPnl": 5},
                {"realizedPnl": 999}
            ]}"#,
        )
        .create_async()
        .await;

    let days = load_month(
        &source(&server.url()),
        CalendarMonth::new(2025, 0).unwrap(),
        &SettlementZone::utc(),
    )
    .await;

    assert_eq!(days.len(), 2);
    let third = &days[&NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()];
    assert_eq!(third.pnl, dec!(30));
    assert_eq!(third.trades, 2);
    assert_eq!(third.win_rate, dec!(50));
    assert_eq!(third.avg_r, dec!(0.3));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/trades/summary")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let (from, to) = january();
    let err = source(&server.url())
        .get_trade_summary(from, to)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::ParseError(_)));
}
