// Property-based tests for chart window resolution
//
// The resolver never fails; its bucket list always covers every calendar
// month between start and end, inclusive.

use chrono::{Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;
use proptest::prelude::*;
use realtydesk::core::YearMonth;
use realtydesk::dashboard::models::{ChartFilter, ChartPeriod};
use realtydesk::dashboard::services::resolve_window;

fn now() -> chrono::DateTime<Tz> {
    Tz::UTC.with_ymd_and_hms(2024, 5, 15, 10, 30, 0).unwrap()
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2040, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn custom(from: NaiveDate, to: NaiveDate) -> ChartFilter {
    ChartFilter {
        period: Some("custom".to_string()),
        from: Some(from.format("%Y-%m-%d").to_string()),
        to: Some(to.format("%Y-%m-%d").to_string()),
        ..ChartFilter::default()
    }
}

fn months_between(a: NaiveDate, b: NaiveDate) -> usize {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    ((b.year() - a.year()) * 12 + b.month() as i32 - a.month() as i32 + 1) as usize
}

proptest! {
    #[test]
    fn test_custom_bucket_count_is_months_spanned(
        from in date_strategy(),
        to in date_strategy(),
    ) {
        let window = resolve_window(&custom(from, to), now());
        prop_assert_eq!(window.period, ChartPeriod::Custom);
        prop_assert_eq!(window.months.len(), months_between(from, to));
        prop_assert!(window.start <= window.end);
    }

    #[test]
    fn test_custom_is_order_independent(
        from in date_strategy(),
        to in date_strategy(),
    ) {
        let forward = resolve_window(&custom(from, to), now());
        let backward = resolve_window(&custom(to, from), now());
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn test_month_period_is_one_bucket(year in 1990i32..2040, month in 1u32..=12) {
        let filter = ChartFilter {
            period: Some("month".to_string()),
            year: Some(year.to_string()),
            month: Some(month.to_string()),
            ..ChartFilter::default()
        };
        let window = resolve_window(&filter, now());
        prop_assert_eq!(window.months, vec![YearMonth::new(year, month).unwrap()]);
        prop_assert_eq!(window.start.day(), 1);
    }

    #[test]
    fn test_bad_month_falls_back(month in 13u32..1000) {
        let filter = ChartFilter {
            period: Some("month".to_string()),
            year: Some("2024".to_string()),
            month: Some(month.to_string()),
            ..ChartFilter::default()
        };
        prop_assert_eq!(resolve_window(&filter, now()).period, ChartPeriod::ThisYear);
    }

    #[test]
    fn test_arbitrary_period_never_panics(period in ".{0,16}") {
        let window = resolve_window(&ChartFilter::period(&period), now());
        prop_assert!(!window.months.is_empty());
        prop_assert!(window.start <= window.end);
    }

    #[test]
    fn test_trailing_windows_end_now(days_into_year in 0i64..365) {
        let now = Tz::UTC.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap()
            + chrono::Duration::days(days_into_year);
        for (period, expected_min) in [("last_3", 3usize), ("last_6", 6usize)] {
            let window = resolve_window(&ChartFilter::period(period), now);
            prop_assert_eq!(window.end, now);
            prop_assert!(window.months.len() >= expected_min);
            prop_assert!(window.months.len() <= expected_min + 1);
            prop_assert_eq!(*window.months.last().unwrap(), YearMonth::of(now.date_naive()));
        }
    }
}

#[test]
fn test_month_thirteen_falls_back_to_this_year() {
    let filter = ChartFilter {
        period: Some("month".to_string()),
        year: Some("2024".to_string()),
        month: Some("13".to_string()),
        ..ChartFilter::default()
    };
    let window = resolve_window(&filter, now());
    assert_eq!(window.period, ChartPeriod::ThisYear);
    assert_eq!(window.months.len(), 12);
}

#[test]
fn test_custom_range_with_extended_years_falls_back() {
    let filter = ChartFilter {
        period: Some("custom".to_string()),
        from: Some("-200000-01-01".to_string()),
        to: Some("+200000-12-31".to_string()),
        ..ChartFilter::default()
    };
    let window = resolve_window(&filter, now());
    assert_eq!(window.period, ChartPeriod::ThisYear);
    assert_eq!(window.months.len(), 12);
}

proptest! {
    #[test]
    fn test_custom_years_past_9999_fall_back(year in 10_000i32..200_000, month in 1u32..=12) {
        let filter = ChartFilter {
            period: Some("custom".to_string()),
            from: Some("2024-01-01".to_string()),
            to: Some(format!("+{}-{:02}-01", year, month)),
            ..ChartFilter::default()
        };
        let window = resolve_window(&filter, now());
        prop_assert_eq!(window.period, ChartPeriod::ThisYear);
        prop_assert_eq!(window.months.len(), 12);
    }
}
