// Property-based tests for the month aggregator
//
// Role series always add up to the bucket totals, every closed deal in the
// window is counted once, and the bucket list depends only on the window.

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;
use realtydesk::dashboard::models::{ChartFilter, RoleFilter};
use realtydesk::dashboard::services::{aggregate, present_income, present_sales, resolve_window};
use realtydesk::transactions::{Representation, Transaction, TransactionStatus};
use rust_decimal::Decimal;

fn now() -> DateTime<Tz> {
    Tz::UTC.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap()
}

fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (
        prop_oneof![
            3 => Just(TransactionStatus::Closed),
            1 => Just(TransactionStatus::Active),
            1 => Just(TransactionStatus::Canceled),
        ],
        prop_oneof![
            Just("buyer"),
            Just("seller"),
            Just("dual"),
            Just("referral"),
            Just(""),
        ],
        proptest::option::of((0i64..=10_000).prop_map(|c| Decimal::new(c, 2))),
        proptest::option::of((0i64..=500_000_000).prop_map(|c| Decimal::new(c, 2))),
        // 2023-07-01 through early 2025, so some deals fall outside 2024
        0i64..(600 * 24),
    )
        .prop_map(|(status, representation, pct, price, hours)| {
            let updated_at = Utc.with_ymd_and_hms(2023, 7, 1, 0, 0, 0).unwrap()
                + Duration::hours(hours);
            Transaction {
                id: hours,
                property_id: 1,
                status,
                representation: representation.to_string(),
                commission_percentage: pct,
                final_sales_price: price,
                file_number: String::new(),
                lockbox_code: String::new(),
                showing_instructions: String::new(),
                listing_date: None,
                created_at: updated_at,
                updated_at,
            }
        })
}

fn in_window(transactions: &[Transaction]) -> Vec<&Transaction> {
    let window = resolve_window(&ChartFilter::default(), now());
    transactions
        .iter()
        .filter(|t| t.is_closed() && window.contains(t.updated_at))
        .collect()
}

proptest! {
    #[test]
    fn test_buckets_are_zero_filled_from_window(
        transactions in proptest::collection::vec(transaction_strategy(), 0..40),
    ) {
        let window = resolve_window(&ChartFilter::default(), now());
        let buckets = aggregate(&window, RoleFilter::all(), &transactions);
        prop_assert_eq!(buckets.len(), 12);
        let months: Vec<_> = buckets.iter().map(|b| b.month).collect();
        prop_assert_eq!(months, window.months);
    }

    #[test]
    fn test_every_closed_deal_counted_once(
        transactions in proptest::collection::vec(transaction_strategy(), 0..40),
    ) {
        let window = resolve_window(&ChartFilter::default(), now());
        let buckets = aggregate(&window, RoleFilter::all(), &transactions);
        let expected = in_window(&transactions);

        let counted: u32 = buckets
            .iter()
            .map(|b| b.buyer.closed_count + b.seller.closed_count + b.dual.closed_count)
            .sum();
        prop_assert_eq!(counted as usize, expected.len());

        let gci: Decimal = expected.iter().filter_map(|t| t.gci()).sum();
        let sales: Decimal = expected.iter().filter_map(|t| t.final_sales_price).sum();
        prop_assert_eq!(buckets.iter().map(|b| b.gci_total()).sum::<Decimal>(), gci);
        prop_assert_eq!(buckets.iter().map(|b| b.sales_total()).sum::<Decimal>(), sales);
    }

    #[test]
    fn test_unknown_roles_land_in_buyer(
        transactions in proptest::collection::vec(transaction_strategy(), 0..40),
    ) {
        let window = resolve_window(&ChartFilter::default(), now());
        let buckets = aggregate(&window, RoleFilter::all(), &transactions);

        let buyer_like = in_window(&transactions)
            .into_iter()
            .filter(|t| !matches!(t.representation.as_str(), "seller" | "dual"))
            .count();
        let buyer_counted: u32 = buckets.iter().map(|b| b.buyer.closed_count).sum();
        prop_assert_eq!(buyer_counted as usize, buyer_like);
    }

    #[test]
    fn test_role_filter_only_removes_roles(
        transactions in proptest::collection::vec(transaction_strategy(), 0..40),
    ) {
        let window = resolve_window(&ChartFilter::default(), now());
        let all = aggregate(&window, RoleFilter::all(), &transactions);
        let sellers = aggregate(&window, RoleFilter::parse(Some("seller")), &transactions);

        for (full, filtered) in all.iter().zip(&sellers) {
            prop_assert_eq!(full.seller, filtered.seller);
            prop_assert_eq!(filtered.buyer.closed_count, 0);
            prop_assert_eq!(filtered.dual.closed_count, 0);
            prop_assert_eq!(filtered.role(Representation::Buyer).gci_total, Decimal::ZERO);
        }
    }

    #[test]
    fn test_presented_series_align(
        transactions in proptest::collection::vec(transaction_strategy(), 0..40),
    ) {
        let window = resolve_window(&ChartFilter::default(), now());
        let buckets = aggregate(&window, RoleFilter::all(), &transactions);

        for series in [present_income(&window, &buckets), present_sales(&window, &buckets)] {
            let n = series.labels.len();
            prop_assert_eq!(n, 12);
            prop_assert_eq!(series.total.len(), n);
            prop_assert_eq!(series.buyer.len(), n);
            prop_assert_eq!(series.seller.len(), n);
            prop_assert_eq!(series.dual.len(), n);
            prop_assert_eq!(series.count_buyer.len(), n);
            prop_assert_eq!(series.count_seller.len(), n);
            prop_assert_eq!(series.count_dual.len(), n);
        }

        let sales = present_sales(&window, &buckets);
        let closed: u32 = sales.count_buyer.iter().chain(&sales.count_seller).chain(&sales.count_dual).sum();
        prop_assert_eq!(closed as usize, in_window(&transactions).len());
    }
}

#[test]
fn test_empty_input_gives_zero_buckets() {
    let window = resolve_window(&ChartFilter::period("last_6"), now());
    let buckets = aggregate(&window, RoleFilter::all(), &[]);
    assert_eq!(buckets.len(), window.months.len());
    assert!(buckets
        .iter()
        .all(|b| b.gci_total().is_zero() && b.sales_total().is_zero()));

    let income = present_income(&window, &buckets);
    assert_eq!(income.grand_total, 0.0);
    assert_eq!(income.grand_total_display, "$0");
}
