// Dashboard flow tests.
//
// Drive DashboardService end to end (window, aggregation, presentation)
// against an in-memory store with a fixed clock.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use realtydesk::core::AppTimezone;
use realtydesk::dashboard::models::RecordCounts;
use realtydesk::dashboard::{DashboardQuery, DashboardResponse, DashboardService};
use realtydesk::modules::settings::AppSettings;
use rust_decimal_macros::dec;

use helpers::{closed_deal, InMemoryDashboardStore};

const AGENT: i64 = 7;
const OTHER_AGENT: i64 = 8;

fn now() -> DateTime<Tz> {
    Tz::UTC.with_ymd_and_hms(2024, 6, 20, 15, 0, 0).unwrap()
}

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

async fn build(store: InMemoryDashboardStore, tenant_id: i64, query: DashboardQuery) -> DashboardResponse {
    let service = DashboardService::new(Arc::new(store), AppTimezone::utc());
    service
        .dashboard_at(tenant_id, &query, now())
        .await
        .expect("dashboard should build")
}

fn month_query(year: i32, month: u32) -> DashboardQuery {
    DashboardQuery {
        income_period: Some("month".to_string()),
        income_year: Some(year.to_string()),
        income_month: Some(month.to_string()),
        sales_period: Some("month".to_string()),
        sales_year: Some(year.to_string()),
        sales_month: Some(month.to_string()),
        ..DashboardQuery::default()
    }
}

#[tokio::test]
async fn test_closed_seller_deal_shows_in_its_month() {
    let store = InMemoryDashboardStore::new();
    store.insert(
        AGENT,
        closed_deal("seller", Some(dec!(5.00)), Some(dec!(600000.00)), at(2024, 3, 14)),
    );

    let dashboard = build(store, AGENT, month_query(2024, 3)).await;

    assert_eq!(dashboard.income.labels, vec!["Mar 2024".to_string()]);
    assert_eq!(dashboard.income.seller, vec![30000.0]);
    assert_eq!(dashboard.income.count_seller, vec![1]);
    assert_eq!(dashboard.income.grand_total, 30000.0);
    assert_eq!(dashboard.income.grand_total_display, "$30,000");
    assert_eq!(dashboard.total_income, 30000.0);
    assert_eq!(dashboard.total_sales, 600000.0);
}

#[tokio::test]
async fn test_this_year_zero_fills_every_month() {
    let store = InMemoryDashboardStore::new();
    store.insert(
        AGENT,
        closed_deal("buyer", Some(dec!(3.00)), Some(dec!(500000.00)), at(2024, 2, 1)),
    );

    let dashboard = build(store, AGENT, DashboardQuery::default()).await;

    assert_eq!(dashboard.income.labels.len(), 12);
    assert_eq!(dashboard.income.buyer[1], 15000.0);
    assert_eq!(dashboard.income.total.iter().filter(|v| **v == 0.0).count(), 11);
    assert_eq!(dashboard.sales.total[1], 500000.0);
}

#[tokio::test]
async fn test_unpriced_deal_counts_in_sales_only() {
    let store = InMemoryDashboardStore::new();
    store.insert(AGENT, closed_deal("dual", Some(dec!(2.5)), None, at(2024, 5, 2)));
    store.insert(AGENT, closed_deal("dual", None, Some(dec!(400000)), at(2024, 5, 3)));

    let dashboard = build(store, AGENT, month_query(2024, 5)).await;

    assert_eq!(dashboard.income.dual, vec![0.0]);
    assert_eq!(dashboard.income.count_dual, vec![0]);
    assert_eq!(dashboard.sales.dual, vec![400000.0]);
    assert_eq!(dashboard.sales.count_dual, vec![2]);
}

#[tokio::test]
async fn test_unknown_representation_is_buyer() {
    let store = InMemoryDashboardStore::new();
    store.insert(
        AGENT,
        closed_deal("referral", Some(dec!(1.0)), Some(dec!(200000)), at(2024, 4, 10)),
    );

    let dashboard = build(store, AGENT, month_query(2024, 4)).await;

    assert_eq!(dashboard.income.buyer, vec![2000.0]);
    assert_eq!(dashboard.sales.count_buyer, vec![1]);
    assert_eq!(dashboard.sales.count_seller, vec![0]);
}

#[tokio::test]
async fn test_other_tenants_deals_are_invisible() {
    let store = InMemoryDashboardStore::new()
        .with_counts(
            AGENT,
            RecordCounts {
                clients: 2,
                properties: 1,
                leads: 0,
                transactions: 1,
            },
        )
        .with_counts(
            OTHER_AGENT,
            RecordCounts {
                clients: 9,
                ..RecordCounts::default()
            },
        );
    store.insert(
        OTHER_AGENT,
        closed_deal("seller", Some(dec!(6)), Some(dec!(1000000)), at(2024, 6, 1)),
    );

    let dashboard = build(store, AGENT, DashboardQuery::default()).await;

    assert_eq!(dashboard.counts.clients, 2);
    assert_eq!(dashboard.total_income, 0.0);
    assert_eq!(dashboard.total_sales, 0.0);
    assert_eq!(dashboard.income.grand_total_display, "$0");
}

#[tokio::test]
async fn test_income_and_sales_windows_are_independent() {
    let store = InMemoryDashboardStore::new();
    store.insert(
        AGENT,
        closed_deal("seller", Some(dec!(5)), Some(dec!(100000)), at(2024, 1, 15)),
    );

    let query = DashboardQuery {
        income_period: Some("month".to_string()),
        income_year: Some("2024".to_string()),
        income_month: Some("1".to_string()),
        sales_period: Some("last_3".to_string()),
        ..DashboardQuery::default()
    };
    let dashboard = build(store, AGENT, query).await;

    assert_eq!(dashboard.total_income, 5000.0);
    // last_3 from June 20 starts in March
    assert_eq!(dashboard.sales.labels, vec!["Mar", "Apr", "May", "Jun"]);
    assert_eq!(dashboard.total_sales, 0.0);
    assert_eq!(dashboard.income_filter.period, "month");
    assert_eq!(dashboard.sales_filter.period, "last_3");
}

#[tokio::test]
async fn test_role_filter_limits_series() {
    let store = InMemoryDashboardStore::new();
    store.insert(AGENT, closed_deal("buyer", Some(dec!(3)), Some(dec!(300000)), at(2024, 6, 1)));
    store.insert(AGENT, closed_deal("seller", Some(dec!(3)), Some(dec!(100000)), at(2024, 6, 2)));

    let query = DashboardQuery {
        income_roles: Some("seller".to_string()),
        ..month_query(2024, 6)
    };
    let dashboard = build(store, AGENT, query).await;

    assert_eq!(dashboard.income.buyer, vec![0.0]);
    assert_eq!(dashboard.income.seller, vec![3000.0]);
    assert_eq!(dashboard.total_income, 3000.0);
    assert_eq!(dashboard.income_filter.roles, "seller");
    // the sales chart keeps every role
    assert_eq!(dashboard.total_sales, 400000.0);
}

#[tokio::test]
async fn test_custom_range_spans_year_boundary() {
    let store = InMemoryDashboardStore::new();
    store.insert(AGENT, closed_deal("seller", Some(dec!(4)), Some(dec!(250000)), at(2023, 12, 31)));
    store.insert(AGENT, closed_deal("seller", Some(dec!(4)), Some(dec!(250000)), at(2024, 2, 29)));

    let query = DashboardQuery {
        income_period: Some("custom".to_string()),
        income_from: Some("2024-02-29".to_string()),
        income_to: Some("2023-12-01".to_string()),
        ..DashboardQuery::default()
    };
    let dashboard = build(store, AGENT, query).await;

    assert_eq!(dashboard.income.labels, vec!["Dec", "Jan", "Feb"]);
    assert_eq!(dashboard.income.seller, vec![10000.0, 0.0, 10000.0]);
    assert_eq!(dashboard.income.grand_total_display, "$20,000");
}

#[tokio::test]
async fn test_colors_come_from_settings() {
    let settings = AppSettings {
        chart_colors: serde_json::json!({ "income_bar": "#0a0a0a", "seller": "#123456" }),
        ..AppSettings::default()
    };
    let store = InMemoryDashboardStore::new().with_settings(settings);

    let dashboard = build(store, AGENT, DashboardQuery::default()).await;

    assert_eq!(dashboard.chart_colors.buyer, "#0a0a0a");
    assert_eq!(dashboard.chart_colors.seller, "#123456");
    assert_eq!(dashboard.chart_colors.dual, "#b45309");
    assert_eq!(dashboard.year_choices, [2024, 2023]);
    assert_eq!(dashboard.current_year, 2024);
}
