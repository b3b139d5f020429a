// In-memory dashboard data source

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use realtydesk::core::AppError;
use realtydesk::dashboard::models::RecordCounts;
use realtydesk::dashboard::DashboardRepository;
use realtydesk::modules::settings::AppSettings;
use realtydesk::transactions::{Transaction, TransactionStatus};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;

/// Transactions keyed by tenant, plus fixed counts and settings
#[derive(Default)]
pub struct InMemoryDashboardStore {
    transactions: Mutex<Vec<(i64, Transaction)>>,
    counts: HashMap<i64, RecordCounts>,
    pub settings: AppSettings,
}

impl InMemoryDashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counts(mut self, tenant_id: i64, counts: RecordCounts) -> Self {
        self.counts.insert(tenant_id, counts);
        self
    }

    pub fn with_settings(mut self, settings: AppSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn insert(&self, tenant_id: i64, transaction: Transaction) {
        self.transactions
            .lock()
            .unwrap()
            .push((tenant_id, transaction));
    }
}

#[async_trait]
impl DashboardRepository for InMemoryDashboardStore {
    async fn record_counts(&self, tenant_id: i64) -> Result<RecordCounts, AppError> {
        Ok(self.counts.get(&tenant_id).copied().unwrap_or_default())
    }

    async fn closed_transactions(
        &self,
        tenant_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, AppError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, t)| {
                *owner == tenant_id
                    && t.status == TransactionStatus::Closed
                    && t.updated_at >= start
                    && t.updated_at <= end
            })
            .map(|(_, t)| t.clone())
            .collect())
    }

    async fn app_settings(&self) -> Result<AppSettings, AppError> {
        Ok(self.settings.clone())
    }
}

/// A closed deal updated at `updated_at`
pub fn closed_deal(
    representation: &str,
    commission_percentage: Option<Decimal>,
    final_sales_price: Option<Decimal>,
    updated_at: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id: updated_at.timestamp(),
        property_id: 1,
        status: TransactionStatus::Closed,
        representation: representation.to_string(),
        commission_percentage,
        final_sales_price,
        file_number: String::new(),
        lockbox_code: String::new(),
        showing_instructions: String::new(),
        listing_date: None,
        created_at: updated_at,
        updated_at,
    }
}
