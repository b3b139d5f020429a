use std::sync::Arc;

use chrono::Utc;
use sqlx::MySqlPool;
use tracing::{debug, info};

use crate::core::pagination::{like_pattern, normalize_page, offset_for, PAGE_SIZE};
use crate::core::{Page, Result};
use crate::modules::clients::ClientRepository;
use crate::modules::leads::models::{Lead, LeadChanges, LeadListQuery, LeadRow};

const LEAD_COLUMNS: &str = "id, first_name, last_name, email, phone, referral, status, address, \
     city, state, zip_code, notes, converted_to_client_id, created_at, updated_at";

/// Result of converting a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// A client was created and linked
    Created(i64),
    /// The lead already pointed at this client
    AlreadyConverted(i64),
}

impl ConversionOutcome {
    pub fn client_id(&self) -> i64 {
        match self {
            ConversionOutcome::Created(id) | ConversionOutcome::AlreadyConverted(id) => *id,
        }
    }
}

/// Tenant-scoped lead persistence
pub struct LeadRepository {
    pool: MySqlPool,
    client_repo: Arc<ClientRepository>,
}

impl LeadRepository {
    pub fn new(pool: MySqlPool, client_repo: Arc<ClientRepository>) -> Self {
        Self { pool, client_repo }
    }

    /// Converted leads are hidden unless `show_all` is set
    pub async fn list(&self, tenant_id: i64, query: &LeadListQuery) -> Result<Page<Lead>> {
        let page = normalize_page(query.page);
        let pattern = like_pattern(query.q.as_deref());
        let status = query.status.as_deref().filter(|s| !s.is_empty());
        let referral = query.referral.as_deref().filter(|s| !s.is_empty());
        let show_all = query.show_all();

        let filters = r#"
            FROM leads
            WHERE user_id = ?
              AND (? OR converted_to_client_id IS NULL)
              AND (? IS NULL OR status = ?)
              AND (? IS NULL OR referral = ?)
              AND (? IS NULL
                   OR first_name LIKE ?
                   OR last_name LIKE ?
                   OR email LIKE ?
                   OR phone LIKE ?
                   OR city LIKE ?)
        "#;

        let count_sql = format!("SELECT COUNT(*) {}", filters);
        let (total,): (i64,) = sqlx::query_as(&count_sql)
            .bind(tenant_id)
            .bind(show_all)
            .bind(status)
            .bind(status)
            .bind(referral)
            .bind(referral)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        let list_sql = format!(
            "SELECT {} {} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            LEAD_COLUMNS, filters
        );
        let rows = sqlx::query_as::<_, LeadRow>(&list_sql)
            .bind(tenant_id)
            .bind(show_all)
            .bind(status)
            .bind(status)
            .bind(referral)
            .bind(referral)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(PAGE_SIZE)
            .bind(offset_for(page))
            .fetch_all(&self.pool)
            .await?;

        debug!(tenant_id, total, page, show_all, "Listed leads");
        Ok(Page::new(rows.into_iter().map(Lead::from).collect(), page, total))
    }

    pub async fn find_by_id(&self, tenant_id: i64, id: i64) -> Result<Option<Lead>> {
        let sql = format!("SELECT {} FROM leads WHERE id = ? AND user_id = ?", LEAD_COLUMNS);
        let row = sqlx::query_as::<_, LeadRow>(&sql)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Lead::from))
    }

    /// Every lead of the tenant, newest first, converted ones included
    pub async fn all(&self, tenant_id: i64) -> Result<Vec<Lead>> {
        let sql = format!(
            "SELECT {} FROM leads WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            LEAD_COLUMNS
        );
        let rows = sqlx::query_as::<_, LeadRow>(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Lead::from).collect())
    }

    pub async fn create(&self, tenant_id: i64, changes: &LeadChanges) -> Result<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO leads (
                user_id, first_name, last_name, email, phone, referral, status,
                address, city, state, zip_code, notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(tenant_id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(changes.referral_code())
        .bind(changes.status.as_str())
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.state)
        .bind(&changes.zip_code)
        .bind(&changes.notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        info!(tenant_id, lead_id = id, "Lead created");
        Ok(id)
    }

    pub async fn update(&self, tenant_id: i64, id: i64, changes: &LeadChanges) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE leads
            SET first_name = ?, last_name = ?, email = ?, phone = ?, referral = ?,
                status = ?, address = ?, city = ?, state = ?, zip_code = ?, notes = ?,
                updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(changes.referral_code())
        .bind(changes.status.as_str())
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.state)
        .bind(&changes.zip_code)
        .bind(&changes.notes)
        .bind(Utc::now())
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, tenant_id: i64, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM leads WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!(tenant_id, lead_id = id, "Lead deleted");
        }
        Ok(result.rows_affected() > 0)
    }

    /// Convert a lead into a client in one database transaction.
    ///
    /// The lead row is locked first, so two concurrent conversions of the
    /// same lead produce one client. Returns `None` when the lead is missing
    /// or foreign.
    pub async fn convert_to_client(
        &self,
        tenant_id: i64,
        id: i64,
    ) -> Result<Option<ConversionOutcome>> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "SELECT {} FROM leads WHERE id = ? AND user_id = ? FOR UPDATE",
            LEAD_COLUMNS
        );
        let row = sqlx::query_as::<_, LeadRow>(&sql)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(lead) = row.map(Lead::from) else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(client_id) = lead.converted_to_client_id {
            tx.rollback().await?;
            return Ok(Some(ConversionOutcome::AlreadyConverted(client_id)));
        }

        let client_id = self
            .client_repo
            .create_with_tx(&mut tx, tenant_id, &lead.to_client_changes())
            .await?;

        sqlx::query("UPDATE leads SET converted_to_client_id = ?, updated_at = ? WHERE id = ?")
            .bind(client_id)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(tenant_id, lead_id = id, client_id, "Lead converted to client");
        Ok(Some(ConversionOutcome::Created(client_id)))
    }
}
