//! Contract tests for GET /dashboard
//!
//! Validates the response shape the dashboard client depends on: counts,
//! two chart series whose arrays line up with their labels, totals, colors,
//! echoed filters and the year/month choices. Runs against an in-memory store.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use actix_web::dev::Service;
use actix_web::{test, web, App, HttpMessage};
use chrono::{Datelike, Duration, Utc};
use realtydesk::core::AppTimezone;
use realtydesk::dashboard::models::RecordCounts;
use realtydesk::dashboard::{controllers, DashboardService};
use realtydesk::middleware::TenantId;
use realtydesk::modules::settings::AppSettings;
use rust_decimal_macros::dec;
use serde_json::Value;

use helpers::{closed_deal, InMemoryDashboardStore};

const TENANT: i64 = 1;

async fn get_dashboard(store: InMemoryDashboardStore, query: &str) -> (u16, Value) {
    let service = Arc::new(DashboardService::new(Arc::new(store), AppTimezone::utc()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(service))
            .wrap_fn(|req, srv| {
                req.extensions_mut().insert(TenantId(TENANT));
                srv.call(req)
            })
            .configure(controllers::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/dashboard{}", query))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

fn assert_series_shape(series: &Value) {
    let labels = series["labels"].as_array().expect("labels array");
    for key in [
        "total",
        "buyer",
        "seller",
        "dual",
        "count_buyer",
        "count_seller",
        "count_dual",
    ] {
        let values = series[key]
            .as_array()
            .unwrap_or_else(|| panic!("{} must be an array", key));
        assert_eq!(values.len(), labels.len(), "{} must align with labels", key);
    }
    assert!(series["grand_total"].is_number());
    assert!(series["grand_total_display"].as_str().unwrap().starts_with('$'));
}

#[actix_web::test]
async fn test_dashboard_response_structure() {
    let store = InMemoryDashboardStore::new().with_counts(
        TENANT,
        RecordCounts {
            clients: 4,
            properties: 3,
            leads: 2,
            transactions: 5,
        },
    );

    let (status, body) = get_dashboard(store, "").await;
    assert_eq!(status, 200);

    for key in [
        "counts",
        "income",
        "sales",
        "total_income",
        "total_sales",
        "chart_colors",
        "income_filter",
        "sales_filter",
        "current_year",
        "year_choices",
        "month_choices",
    ] {
        assert!(body.get(key).is_some(), "missing {}", key);
    }

    assert_eq!(body["counts"]["clients"], 4);
    assert_eq!(body["counts"]["leads"], 2);
    assert_series_shape(&body["income"]);
    assert_series_shape(&body["sales"]);
    assert_eq!(body["income"]["labels"].as_array().unwrap().len(), 12);
    assert_eq!(body["income"]["labels"][0], "Jan");

    let year = Utc::now().year();
    assert_eq!(body["current_year"], year);
    assert_eq!(body["year_choices"], serde_json::json!([year, year - 1]));
    assert_eq!(body["month_choices"].as_array().unwrap().len(), 12);
    assert_eq!(body["month_choices"][0]["value"], 1);
    assert_eq!(body["month_choices"][0]["name"], "Jan");
}

#[actix_web::test]
async fn test_default_chart_colors() {
    let (_, body) = get_dashboard(InMemoryDashboardStore::new(), "").await;
    assert_eq!(body["chart_colors"]["buyer"], "#1e4976");
    assert_eq!(body["chart_colors"]["seller"], "#137333");
    assert_eq!(body["chart_colors"]["dual"], "#b45309");
}

#[actix_web::test]
async fn test_legacy_color_keys() {
    let settings = AppSettings {
        chart_colors: serde_json::json!({ "income_bar": "#111111", "dual": "" }),
        ..AppSettings::default()
    };
    let (_, body) =
        get_dashboard(InMemoryDashboardStore::new().with_settings(settings), "").await;
    assert_eq!(body["chart_colors"]["buyer"], "#111111");
    assert_eq!(body["chart_colors"]["dual"], "#b45309");
}

#[actix_web::test]
async fn test_single_month_label_and_echo() {
    let (status, body) = get_dashboard(
        InMemoryDashboardStore::new(),
        "?income_period=month&income_year=2024&income_month=1",
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["income"]["labels"], serde_json::json!(["Jan 2024"]));
    assert_eq!(body["income_filter"]["period"], "month");
    assert_eq!(body["income_filter"]["year"], "2024");
    assert_eq!(body["income_filter"]["month"], "1");
    assert_eq!(body["sales_filter"]["period"], "this_year");
}

#[actix_web::test]
async fn test_malformed_parameters_never_fail() {
    for query in [
        "?income_period=month&income_year=2024&income_month=13",
        "?income_period=month&income_year=abc",
        "?income_period=custom&income_from=2024-01-01",
        "?sales_period=fortnight",
        "?income_year=1&income_year=2",
    ] {
        let (status, body) = get_dashboard(InMemoryDashboardStore::new(), query).await;
        assert_eq!(status, 200, "query {}", query);
        assert_eq!(
            body["income"]["labels"].as_array().unwrap().len(),
            12,
            "query {} should fall back to this_year",
            query
        );
    }
}

#[actix_web::test]
async fn test_totals_are_formatted() {
    let store = InMemoryDashboardStore::new();
    let recent = Utc::now() - Duration::minutes(5);
    store.insert(TENANT, closed_deal("seller", Some(dec!(5.00)), Some(dec!(600000.00)), recent));
    store.insert(TENANT, closed_deal("dual", Some(dec!(2.5)), Some(dec!(650000.00)), recent));

    let (_, body) = get_dashboard(
        store,
        &format!(
            "?income_period=month&income_year={}&income_month={}&sales_period=month&sales_year={}&sales_month={}",
            recent.year(),
            recent.month(),
            recent.year(),
            recent.month()
        ),
    )
    .await;

    assert_eq!(body["total_income"], 46250.0);
    assert_eq!(body["income"]["grand_total_display"], "$46,250");
    assert_eq!(body["total_sales"], 1250000.0);
    assert_eq!(body["sales"]["grand_total_display"], "$1,250,000");
    assert_eq!(body["income"]["count_seller"], serde_json::json!([1]));
    assert_eq!(body["income"]["count_dual"], serde_json::json!([1]));
}

#[actix_web::test]
async fn test_missing_tenant_is_unauthorized() {
    let service = Arc::new(DashboardService::new(
        Arc::new(InMemoryDashboardStore::new()),
        AppTimezone::utc(),
    ));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(service))
            .configure(controllers::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 401);
}
