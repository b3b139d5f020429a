use chrono::Utc;
use sqlx::MySqlPool;
use tracing::{debug, info};

use crate::core::pagination::{like_pattern, normalize_page, offset_for, PAGE_SIZE};
use crate::core::{Page, Result};
use crate::modules::contacts::models::{Contact, ContactChanges, ContactListQuery, ContactRow};

const CONTACT_COLUMNS: &str = "id, first_name, last_name, email, phone, contact_type, company, \
     address, city, state, zip_code, notes, created_at, updated_at";

pub struct ContactRepository {
    pool: MySqlPool,
}

impl ContactRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, tenant_id: i64, query: &ContactListQuery) -> Result<Page<Contact>> {
        let page = normalize_page(query.page);
        let pattern = like_pattern(query.q.as_deref());
        let contact_type = query.contact_type.as_deref().filter(|s| !s.is_empty());

        let filters = r#"
            FROM contacts
            WHERE user_id = ?
              AND (? IS NULL OR contact_type = ?)
              AND (? IS NULL
                   OR first_name LIKE ?
                   OR last_name LIKE ?
                   OR email LIKE ?
                   OR phone LIKE ?
                   OR company LIKE ?
                   OR city LIKE ?)
        "#;

        let count_sql = format!("SELECT COUNT(*) {}", filters);
        let (total,): (i64,) = sqlx::query_as(&count_sql)
            .bind(tenant_id)
            .bind(contact_type)
            .bind(contact_type)
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
            CONTACT_COLUMNS, filters
        );
        let rows = sqlx::query_as::<_, ContactRow>(&list_sql)
            .bind(tenant_id)
            .bind(contact_type)
            .bind(contact_type)
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

        debug!(tenant_id, total, page, "Listed contacts");
        Ok(Page::new(rows.into_iter().map(Contact::from).collect(), page, total))
    }

    pub async fn find_by_id(&self, tenant_id: i64, id: i64) -> Result<Option<Contact>> {
        let sql = format!(
            "SELECT {} FROM contacts WHERE id = ? AND user_id = ?",
            CONTACT_COLUMNS
        );
        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Contact::from))
    }

    /// Every contact of the tenant, in list order
    pub async fn all(&self, tenant_id: i64) -> Result<Vec<Contact>> {
        let sql = format!(
            "SELECT {} FROM contacts WHERE user_id = ? ORDER BY last_name, first_name, id",
            CONTACT_COLUMNS
        );
        let rows = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    pub async fn create(&self, tenant_id: i64, changes: &ContactChanges) -> Result<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO contacts (
                user_id, first_name, last_name, email, phone, contact_type, company,
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
        .bind(changes.contact_type.as_str())
        .bind(&changes.company)
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
        info!(tenant_id, contact_id = id, "Contact created");
        Ok(id)
    }

    pub async fn update(&self, tenant_id: i64, id: i64, changes: &ContactChanges) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET first_name = ?, last_name = ?, email = ?, phone = ?, contact_type = ?,
                company = ?, address = ?, city = ?, state = ?, zip_code = ?, notes = ?,
                updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(changes.contact_type.as_str())
        .bind(&changes.company)
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
        let result = sqlx::query("DELETE FROM contacts WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
