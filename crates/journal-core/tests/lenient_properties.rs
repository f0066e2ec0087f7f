//! 관대한 역직렬화와 결제일 계산 속성 테스트

use journal_core::{
    lenient_decimal, realized_pnl, win_rate_pct, PositionSide, SettlementZone, TradeRecord,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

proptest! {
    #[test]
    fn arbitrary_strings_never_panic(s in ".*") {
        let _ = lenient_decimal(&json!(s));
        let _ = SettlementZone::utc().date_of(&s);
    }

    #[test]
    fn integer_strings_match_numbers(n in -1_000_000_000i64..1_000_000_000) {
        prop_assert_eq!(lenient_decimal(&json!(n)), Some(Decimal::from(n)));
        prop_assert_eq!(lenient_decimal(&json!(n.to_string())), Some(Decimal::from(n)));
    }

    #[test]
    fn short_mirrors_long(
        entry in 1i64..100_000,
        exit in 1i64..100_000,
        size in 1i64..10_000,
    ) {
        let (entry, exit, size) = (Decimal::new(entry, 2), Decimal::new(exit, 2), Decimal::from(size));
        prop_assert_eq!(
            realized_pnl(entry, exit, size, PositionSide::Long),
            realized_pnl(entry, exit, size, PositionSide::Short).map(|pnl| -pnl)
        );
    }

    #[test]
    fn win_rate_bounded(trades in 0u32..10_000, wins in 0u32..10_000) {
        let wins = wins.min(trades);
        let rate = win_rate_pct(wins, trades);
        prop_assert!(rate >= Decimal::ZERO && rate <= dec!(100));
    }

    #[test]
    fn pnl_field_of_any_type_deserializes(
        pnl in proptest::option::of(prop_oneof![
            Just(json!("NaN")),
            Just(json!("Infinity")),
            Just(json!(true)),
            Just(json!(null)),
            (-1_000_000i64..1_000_000).prop_map(|c| json!(c)),
        ]),
    ) {
        let mut obj = serde_json::Map::new();
        if let Some(v) = pnl {
            obj.insert("realizedPnl".to_string(), v);
        }
        let trade: TradeRecord = serde_json::from_value(serde_json::Value::Object(obj)).unwrap();
        // 숫자가 아닌 값은 0으로 기여한다
        let _ = trade.realized_pnl();
        prop_assert!(trade.settlement_date(&SettlementZone::utc()).is_none());
    }
}

#[test]
fn settlement_date_follows_zone() {
    let trade = TradeRecord::new().with_exit_time("2025-01-31T20:00:00Z");

    let utc = trade.settlement_date(&SettlementZone::utc()).unwrap();
    let seoul = trade
        .settlement_date(&SettlementZone::named("Asia/Seoul").unwrap())
        .unwrap();

    assert_eq!(utc.to_string(), "2025-01-31");
    assert_eq!(seoul.to_string(), "2025-02-01");
}
