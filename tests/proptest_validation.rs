//! Property-Based Tests - Order Validation Invariants
//!
//! Uses `proptest` to check the validator's per-field rules across
//! random inputs.

use proptest::prelude::*;
use rust_decimal::Decimal;

use binance_futures_bot::domain::validation::{ValidationError, validate_order_params};

/// Decimals from `-max` to `max` with up to 8 fractional digits.
fn decimal_in(max: i64) -> impl Strategy<Value = Decimal> {
    (-max * 100_000_000..=max * 100_000_000).prop_map(|units| Decimal::new(units, 8))
}

fn positive_decimal() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000_000_000_000).prop_map(|units| Decimal::new(units, 8))
}

fn non_positive_decimal() -> impl Strategy<Value = Decimal> {
    (-10_000_000_000_000i64..=0).prop_map(|units| Decimal::new(units, 8))
}

fn order_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("MARKET"), Just("LIMIT"), Just("STOP_LIMIT")]
}

fn random_case(s: &str, mask: u32) -> String {
    s.chars()
        .enumerate()
        .map(|(i, c)| {
            if mask & (1 << (i % 32)) == 0 {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

// ── Order type ──────────────────────────────────────────────

proptest! {
    /// Anything outside the three supported types is rejected.
    #[test]
    fn unknown_order_type_rejected(raw in "[A-Za-z_]{1,12}") {
        let upper = raw.to_ascii_uppercase();
        prop_assume!(!["MARKET", "LIMIT", "STOP_LIMIT"].contains(&upper.as_str()));

        let err = validate_order_params("BTCUSDT", "BUY", &raw, Decimal::ONE, None, None)
            .unwrap_err();
        prop_assert_eq!(err, ValidationError::InvalidOrderType(raw.clone()));
    }
}

// ── Quantity ────────────────────────────────────────────────

proptest! {
    /// Non-positive quantities fail whatever prices accompany them.
    #[test]
    fn non_positive_quantity_rejected(
        ty in order_type(),
        quantity in non_positive_decimal(),
        price in proptest::option::of(decimal_in(100_000)),
        stop in proptest::option::of(decimal_in(100_000)),
    ) {
        let err = validate_order_params("BTCUSDT", "SELL", ty, quantity, price, stop)
            .unwrap_err();
        prop_assert_eq!(err, ValidationError::InvalidQuantity(quantity));
    }
}

// ── Prices ──────────────────────────────────────────────────

proptest! {
    /// LIMIT without a positive price fails with MissingPrice.
    #[test]
    fn limit_without_positive_price_rejected(
        quantity in positive_decimal(),
        price in proptest::option::of(non_positive_decimal()),
    ) {
        let err = validate_order_params("BTCUSDT", "BUY", "LIMIT", quantity, price, None)
            .unwrap_err();
        prop_assert_eq!(err, ValidationError::MissingPrice);
    }

    /// STOP_LIMIT with a valid price but no positive stop fails.
    #[test]
    fn stop_limit_without_positive_stop_rejected(
        quantity in positive_decimal(),
        price in positive_decimal(),
        stop in proptest::option::of(non_positive_decimal()),
    ) {
        let err = validate_order_params("BTCUSDT", "SELL", "STOP_LIMIT", quantity, Some(price), stop)
            .unwrap_err();
        prop_assert_eq!(err, ValidationError::MissingStopPrice);
    }

    /// Fully specified orders of every type pass and keep their values.
    #[test]
    fn valid_orders_accepted(
        ty in order_type(),
        quantity in positive_decimal(),
        price in positive_decimal(),
        stop in positive_decimal(),
    ) {
        let req = validate_order_params("BTCUSDT", "BUY", ty, quantity, Some(price), Some(stop))
            .unwrap();
        prop_assert_eq!(req.quantity, quantity);
        prop_assert_eq!(req.price.is_some(), ty != "MARKET");
        prop_assert_eq!(req.stop_price.is_some(), ty == "STOP_LIMIT");
    }
}

// ── Symbol and side ─────────────────────────────────────────

proptest! {
    /// Symbols outside the allow-list fail even when all else is valid.
    #[test]
    fn unlisted_symbol_rejected(symbol in "[A-Za-z]{0,10}") {
        prop_assume!(!symbol.eq_ignore_ascii_case("BTCUSDT"));

        let err = validate_order_params(&symbol, "BUY", "MARKET", Decimal::ONE, None, None)
            .unwrap_err();
        let is_invalid_symbol = matches!(err, ValidationError::InvalidSymbol { .. });
        prop_assert!(is_invalid_symbol);
    }

    /// Symbol and side match regardless of letter case.
    #[test]
    fn symbol_and_side_case_insensitive(mask in any::<u32>(), buy in any::<bool>()) {
        let symbol = random_case("BTCUSDT", mask);
        let side = random_case(if buy { "BUY" } else { "SELL" }, mask.rotate_left(7));

        let req = validate_order_params(&symbol, &side, "market", Decimal::ONE, None, None)
            .unwrap();
        prop_assert_eq!(req.symbol, "BTCUSDT");
    }
}
