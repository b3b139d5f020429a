use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::warn;

use crate::core::error::AppError;
use crate::middleware::auth::TenantId;
use crate::modules::dashboard::models::DashboardQuery;
use crate::modules::dashboard::services::DashboardService;

/// GET /dashboard
///
/// Chart parameters never fail the request. A query string that cannot be
/// parsed at all is treated as empty, and bad individual values fall back to
/// the current year.
pub async fn get_dashboard(
    service: web::Data<Arc<DashboardService>>,
    tenant_id: TenantId,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let query = parse_query(req.query_string());
    let dashboard = service.dashboard(tenant_id.0, &query).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

fn parse_query(raw: &str) -> DashboardQuery {
    match web::Query::<DashboardQuery>::from_query(raw) {
        Ok(query) => query.into_inner(),
        Err(e) => {
            warn!(error = %e, "Unreadable dashboard query, using defaults");
            DashboardQuery::default()
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(get_dashboard));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let query = parse_query("income_period=last_3&sales_year=2023&unrelated=1");
        assert_eq!(query.income_period.as_deref(), Some("last_3"));
        assert_eq!(query.sales_year.as_deref(), Some("2023"));
    }

    #[test]
    fn test_duplicate_keys_fall_back_to_defaults() {
        let query = parse_query("income_year=2024&income_year=2025");
        assert!(query.income_year.is_none());
        assert!(query.income_period.is_none());
    }
}
