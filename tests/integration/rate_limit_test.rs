// Rate limiting through the real route table.
//
// The limiter is process-wide: every worker's App wraps a clone of the same
// RateLimiter, so the budget is shared.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use actix_web::dev::Service;
use actix_web::{test, web, App, HttpMessage};
use realtydesk::core::AppTimezone;
use realtydesk::dashboard::{controllers, DashboardService};
use realtydesk::middleware::{MetricsCollector, MetricsMiddleware, RateLimiter, TenantId};
use realtydesk::modules::health;
use serde_json::Value;

use helpers::InMemoryDashboardStore;

fn dashboard_service() -> web::Data<Arc<DashboardService>> {
    web::Data::new(Arc::new(DashboardService::new(
        Arc::new(InMemoryDashboardStore::new()),
        AppTimezone::utc(),
    )))
}

#[actix_web::test]
async fn test_dashboard_is_limited_and_reports_the_quota() {
    let app = test::init_service(
        App::new()
            .app_data(dashboard_service())
            .wrap_fn(|req, srv| {
                req.extensions_mut().insert(TenantId(1));
                srv.call(req)
            })
            .wrap(RateLimiter::new(3))
            .configure(controllers::configure),
    )
    .await;

    for i in 0..3 {
        let req = test::TestRequest::get().uri("/dashboard").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200, "request {} should pass", i + 1);
    }

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 429);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 429);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Maximum 3 requests per minute"));
}

#[actix_web::test]
async fn test_health_is_never_limited() {
    let app = test::init_service(
        App::new()
            .wrap(RateLimiter::new(1))
            .configure(health::configure),
    )
    .await;

    for _ in 0..10 {
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
    }
}

#[actix_web::test]
async fn test_clones_share_one_budget() {
    let limiter = RateLimiter::new(2);

    let first = test::init_service(
        App::new()
            .wrap(limiter.clone())
            .route("/clients", web::get().to(|| async { "ok" })),
    )
    .await;
    let second = test::init_service(
        App::new()
            .wrap(limiter.clone())
            .route("/clients", web::get().to(|| async { "ok" })),
    )
    .await;

    let req = test::TestRequest::get().uri("/clients").to_request();
    assert_eq!(test::call_service(&first, req).await.status().as_u16(), 200);
    let req = test::TestRequest::get().uri("/clients").to_request();
    assert_eq!(test::call_service(&second, req).await.status().as_u16(), 200);

    let req = test::TestRequest::get().uri("/clients").to_request();
    assert_eq!(test::call_service(&first, req).await.status().as_u16(), 429);
}

#[actix_web::test]
async fn test_rejections_are_counted_in_metrics() {
    let collector = MetricsCollector::new();
    let app = test::init_service(
        App::new()
            .wrap(RateLimiter::new(1))
            .wrap(MetricsMiddleware::new(collector.clone()))
            .route("/leads", web::get().to(|| async { "ok" })),
    )
    .await;

    for _ in 0..3 {
        let req = test::TestRequest::get().uri("/leads").to_request();
        let _ = test::call_service(&app, req).await;
    }

    let metrics = collector.snapshot();
    assert_eq!(metrics.total_requests, 3);
    assert_eq!(metrics.successful_requests, 1);
    assert_eq!(metrics.client_errors, 2);
}
