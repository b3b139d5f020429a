use sqlx::types::Json;
use sqlx::{FromRow, MySqlPool};
use tracing::warn;

use crate::core::Result;
use crate::modules::settings::models::AppSettings;

#[derive(Debug, FromRow)]
struct AppSettingsRow {
    app_name: String,
    chart_colors: Option<Json<serde_json::Value>>,
    inactivity_timeout_minutes: u32,
}

/// Reads the single `app_settings` row
pub struct SettingsRepository {
    pool: MySqlPool,
}

impl SettingsRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Load settings, falling back to defaults when the row is missing
    pub async fn load(&self) -> Result<AppSettings> {
        let row = sqlx::query_as::<_, AppSettingsRow>(
            r#"
            SELECT app_name, chart_colors, inactivity_timeout_minutes
            FROM app_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            warn!("app_settings row missing, using defaults");
            return Ok(AppSettings::default());
        };

        Ok(AppSettings {
            app_name: row.app_name,
            chart_colors: row
                .chart_colors
                .map(|Json(value)| value)
                .unwrap_or_else(|| AppSettings::default().chart_colors),
            inactivity_timeout_minutes: row.inactivity_timeout_minutes,
        })
    }
}
