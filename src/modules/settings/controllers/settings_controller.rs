use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::core::error::AppError;
use crate::middleware::auth::TenantId;
use crate::modules::settings::models::{AppSettings, ChartColors};
use crate::modules::settings::repositories::SettingsRepository;

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub app_name: String,
    pub chart_colors: ChartColors,
    pub inactivity_timeout_minutes: u32,
}

impl From<AppSettings> for SettingsResponse {
    fn from(settings: AppSettings) -> Self {
        Self {
            chart_colors: settings.colors(),
            app_name: settings.app_name,
            inactivity_timeout_minutes: settings.inactivity_timeout_minutes,
        }
    }
}

/// GET /settings
pub async fn get_settings(
    repo: web::Data<Arc<SettingsRepository>>,
    _tenant_id: TenantId,
) -> Result<HttpResponse, AppError> {
    let settings = repo.load().await?;
    Ok(HttpResponse::Ok().json(SettingsResponse::from(settings)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/settings", web::get().to(get_settings));
}
