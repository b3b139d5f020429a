use chrono::Utc;
use sqlx::{MySql, MySqlPool, Transaction};
use tracing::{debug, info};

use crate::core::pagination::{like_pattern, normalize_page, offset_for, PAGE_SIZE};
use crate::core::{Page, Result};
use crate::modules::clients::models::{Client, ClientChanges, ClientListQuery, ClientRow};

const CLIENT_COLUMNS: &str = "id, first_name, last_name, email, phone, spouse_first_name, \
     spouse_last_name, spouse_email, spouse_phone, client_type, status, address, city, state, \
     zip_code, budget_min, budget_max, notes, created_at, updated_at";

/// Tenant-scoped client persistence
pub struct ClientRepository {
    pool: MySqlPool,
}

impl ClientRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, tenant_id: i64, query: &ClientListQuery) -> Result<Page<Client>> {
        let page = normalize_page(query.page);
        let pattern = like_pattern(query.q.as_deref());
        let client_type = query.client_type.as_deref().filter(|s| !s.is_empty());
        let status = query.status.as_deref().filter(|s| !s.is_empty());

        let filters = r#"
            FROM clients
            WHERE user_id = ?
              AND (? IS NULL OR client_type = ?)
              AND (? IS NULL OR status = ?)
              AND (? IS NULL
                   OR first_name LIKE ?
                   OR last_name LIKE ?
                   OR email LIKE ?
                   OR phone LIKE ?
                   OR city LIKE ?
                   OR address LIKE ?)
        "#;

        let count_sql = format!("SELECT COUNT(*) {}", filters);
        let (total,): (i64,) = sqlx::query_as(&count_sql)
            .bind(tenant_id)
            .bind(client_type)
            .bind(client_type)
            .bind(status)
            .bind(status)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        let list_sql = format!(
            "SELECT {} {} ORDER BY last_name, first_name, id LIMIT ? OFFSET ?",
            CLIENT_COLUMNS, filters
        );
        let rows = sqlx::query_as::<_, ClientRow>(&list_sql)
            .bind(tenant_id)
            .bind(client_type)
            .bind(client_type)
            .bind(status)
            .bind(status)
            .bind(&pattern)
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

        debug!(tenant_id, total, page, "Listed clients");
        Ok(Page::new(rows.into_iter().map(Client::from).collect(), page, total))
    }

    pub async fn find_by_id(&self, tenant_id: i64, id: i64) -> Result<Option<Client>> {
        let sql = format!(
            "SELECT {} FROM clients WHERE id = ? AND user_id = ?",
            CLIENT_COLUMNS
        );
        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Client::from))
    }

    /// Every client of the tenant, in list order
    pub async fn all(&self, tenant_id: i64) -> Result<Vec<Client>> {
        let sql = format!(
            "SELECT {} FROM clients WHERE user_id = ? ORDER BY last_name, first_name, id",
            CLIENT_COLUMNS
        );
        let rows = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Client::from).collect())
    }

    pub async fn create(&self, tenant_id: i64, changes: &ClientChanges) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        let id = self.create_with_tx(&mut tx, tenant_id, changes).await?;
        tx.commit().await?;
        Ok(id)
    }

    /// Insert a client within an existing database transaction
    pub async fn create_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        tenant_id: i64,
        changes: &ClientChanges,
    ) -> Result<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO clients (
                user_id, first_name, last_name, email, phone, spouse_first_name,
                spouse_last_name, spouse_email, spouse_phone, client_type, status,
                address, city, state, zip_code, budget_min, budget_max, notes,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(tenant_id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(&changes.spouse_first_name)
        .bind(&changes.spouse_last_name)
        .bind(&changes.spouse_email)
        .bind(&changes.spouse_phone)
        .bind(changes.client_type.as_str())
        .bind(changes.status.as_str())
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.state)
        .bind(&changes.zip_code)
        .bind(changes.budget_min)
        .bind(changes.budget_max)
        .bind(&changes.notes)
        .bind(now)
        .bind(now)
        .execute(&mut **tx)
        .await?;

        let id = result.last_insert_id() as i64;
        info!(tenant_id, client_id = id, "Client created");
        Ok(id)
    }

    pub async fn update(&self, tenant_id: i64, id: i64, changes: &ClientChanges) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET first_name = ?, last_name = ?, email = ?, phone = ?,
                spouse_first_name = ?, spouse_last_name = ?, spouse_email = ?,
                spouse_phone = ?, client_type = ?, status = ?, address = ?, city = ?,
                state = ?, zip_code = ?, budget_min = ?, budget_max = ?, notes = ?,
                updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(&changes.spouse_first_name)
        .bind(&changes.spouse_last_name)
        .bind(&changes.spouse_email)
        .bind(&changes.spouse_phone)
        .bind(changes.client_type.as_str())
        .bind(changes.status.as_str())
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.state)
        .bind(&changes.zip_code)
        .bind(changes.budget_min)
        .bind(changes.budget_max)
        .bind(&changes.notes)
        .bind(Utc::now())
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, tenant_id: i64, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!(tenant_id, client_id = id, "Client deleted");
        }
        Ok(result.rows_affected() > 0)
    }
}
