// Property-based tests for Gross Commission Income
//
// GCI = commission_percentage / 100 * final_sales_price, defined only for
// closed deals with both values present.

use proptest::prelude::*;
use realtydesk::modules::transactions::services::commission_calculator::{
    gross_commission_income, validate_commission_percentage, validate_sales_price,
};
use realtydesk::transactions::TransactionStatus;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn status_strategy() -> impl Strategy<Value = TransactionStatus> {
    prop_oneof![
        Just(TransactionStatus::Active),
        Just(TransactionStatus::Pending),
        Just(TransactionStatus::UnderContract),
        Just(TransactionStatus::Closed),
        Just(TransactionStatus::Canceled),
    ]
}

/// DECIMAL(5, 2) percentage between 0.00 and 100.00
fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// DECIMAL(12, 2) price
fn price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=999_999_999_999).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn test_gci_matches_formula_for_closed_deals(
        pct in percentage_strategy(),
        price in price_strategy(),
    ) {
        let gci = gross_commission_income(TransactionStatus::Closed, Some(pct), Some(price));
        prop_assert_eq!(gci, Some(pct / Decimal::ONE_HUNDRED * price));
    }

    #[test]
    fn test_gci_undefined_unless_closed(
        status in status_strategy(),
        pct in percentage_strategy(),
        price in price_strategy(),
    ) {
        let gci = gross_commission_income(status, Some(pct), Some(price));
        prop_assert_eq!(gci.is_some(), status == TransactionStatus::Closed);
    }

    #[test]
    fn test_gci_undefined_when_a_value_is_missing(
        status in status_strategy(),
        pct in percentage_strategy(),
        price in price_strategy(),
    ) {
        prop_assert_eq!(gross_commission_income(status, None, Some(price)), None);
        prop_assert_eq!(gross_commission_income(status, Some(pct), None), None);
        prop_assert_eq!(gross_commission_income(status, None, None), None);
    }

    #[test]
    fn test_gci_never_exceeds_price(
        pct in percentage_strategy(),
        price in price_strategy(),
    ) {
        let gci = gross_commission_income(TransactionStatus::Closed, Some(pct), Some(price)).unwrap();
        prop_assert!(gci >= Decimal::ZERO);
        prop_assert!(gci <= price, "GCI {} above price {} at {}%", gci, price, pct);
    }

    #[test]
    fn test_stored_percentages_validate(pct in percentage_strategy()) {
        prop_assert!(validate_commission_percentage(pct).is_ok());
    }
}

#[test]
fn test_five_percent_of_six_hundred_thousand() {
    let gci = gross_commission_income(
        TransactionStatus::Closed,
        Some(dec!(5.00)),
        Some(dec!(600000.00)),
    );
    assert_eq!(gci, Some(dec!(30000.00)));
}

#[test]
fn test_closed_without_price_has_no_gci() {
    assert_eq!(
        gross_commission_income(TransactionStatus::Closed, Some(dec!(3)), None),
        None
    );
}

#[test]
fn test_out_of_range_inputs_rejected() {
    assert!(validate_commission_percentage(dec!(100.01)).is_err());
    assert!(validate_commission_percentage(dec!(-0.01)).is_err());
    assert!(validate_commission_percentage(dec!(2.505)).is_err());
    assert!(validate_sales_price(dec!(-1)).is_err());
    assert!(validate_sales_price(dec!(10000000000.00)).is_err());
    assert!(validate_sales_price(dec!(9999999999.99)).is_ok());
}
