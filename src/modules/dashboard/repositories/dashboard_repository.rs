use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use crate::core::error::AppError;
use crate::modules::dashboard::models::RecordCounts;
use crate::modules::settings::{AppSettings, SettingsRepository};
use crate::modules::transactions::models::TransactionRow;
use crate::modules::transactions::Transaction;

/// Read-only queries behind the dashboard
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Headline counts for one tenant
    async fn record_counts(&self, tenant_id: i64) -> Result<RecordCounts, AppError>;

    /// Closed transactions of one tenant whose `updated_at` lies in `[start, end]`
    async fn closed_transactions(
        &self,
        tenant_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, AppError>;

    async fn app_settings(&self) -> Result<AppSettings, AppError>;
}

pub struct MySqlDashboardRepository {
    pool: MySqlPool,
    settings: SettingsRepository,
}

impl MySqlDashboardRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            settings: SettingsRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl DashboardRepository for MySqlDashboardRepository {
    async fn record_counts(&self, tenant_id: i64) -> Result<RecordCounts, AppError> {
        let (clients, properties, leads, transactions): (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM clients WHERE user_id = ?),
                (SELECT COUNT(*) FROM properties WHERE user_id = ?),
                (SELECT COUNT(*) FROM leads WHERE user_id = ? AND converted_to_client_id IS NULL),
                (SELECT COUNT(*) FROM transactions t
                    INNER JOIN properties p ON p.id = t.property_id
                    WHERE p.user_id = ?)
            "#,
        )
        .bind(tenant_id)
        .bind(tenant_id)
        .bind(tenant_id)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(RecordCounts {
            clients,
            properties,
            leads,
            transactions,
        })
    }

    async fn closed_transactions(
        &self,
        tenant_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, AppError> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT t.id, t.property_id, t.status, t.representation,
                   t.commission_percentage, t.final_sales_price, t.file_number,
                   t.lockbox_code, t.showing_instructions, t.listing_date,
                   t.created_at, t.updated_at
            FROM transactions t
            INNER JOIN properties p ON p.id = t.property_id
            WHERE p.user_id = ?
              AND t.status = 'closed'
              AND t.updated_at >= ?
              AND t.updated_at <= ?
            ORDER BY t.updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn app_settings(&self) -> Result<AppSettings, AppError> {
        self.settings.load().await
    }
}
