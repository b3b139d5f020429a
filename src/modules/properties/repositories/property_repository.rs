use chrono::Utc;
use sqlx::MySqlPool;
use tracing::{debug, info};

use crate::core::pagination::{like_pattern, normalize_page, offset_for, PAGE_SIZE};
use crate::core::{Page, Result};
use crate::modules::properties::models::{
    Property, PropertyChanges, PropertyListQuery, PropertyRow,
};

const PROPERTY_COLUMNS: &str = "id, title, property_type, status, address, city, state, zip_code, \
     price, bedrooms, bathrooms, square_feet, lot_size, year_built, mls_number, mls_service, \
     mls_url, description, features, owner_client_id, featured, created_at, updated_at";

pub struct PropertyRepository {
    pool: MySqlPool,
}

impl PropertyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Newest first
    pub async fn list(&self, tenant_id: i64, query: &PropertyListQuery) -> Result<Page<Property>> {
        let page = normalize_page(query.page);
        let pattern = like_pattern(query.q.as_deref());
        let property_type = query.property_type.as_deref().filter(|s| !s.is_empty());
        let status = query.status.as_deref().filter(|s| !s.is_empty());

        let filters = r#"
            FROM properties
            WHERE user_id = ?
              AND (? IS NULL OR property_type = ?)
              AND (? IS NULL OR status = ?)
              AND (? IS NULL
                   OR title LIKE ?
                   OR address LIKE ?
                   OR city LIKE ?
                   OR state LIKE ?
                   OR zip_code LIKE ?
                   OR mls_number LIKE ?)
        "#;

        let count_sql = format!("SELECT COUNT(*) {}", filters);
        let (total,): (i64,) = sqlx::query_as(&count_sql)
            .bind(tenant_id)
            .bind(property_type)
            .bind(property_type)
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
            "SELECT {} {} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            PROPERTY_COLUMNS, filters
        );
        let rows = sqlx::query_as::<_, PropertyRow>(&list_sql)
            .bind(tenant_id)
            .bind(property_type)
            .bind(property_type)
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

        debug!(tenant_id, total, page, "Listed properties");
        Ok(Page::new(rows.into_iter().map(Property::from).collect(), page, total))
    }

    pub async fn find_by_id(&self, tenant_id: i64, id: i64) -> Result<Option<Property>> {
        let sql = format!(
            "SELECT {} FROM properties WHERE id = ? AND user_id = ?",
            PROPERTY_COLUMNS
        );
        let row = sqlx::query_as::<_, PropertyRow>(&sql)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Property::from))
    }

    /// Every property of the tenant, in list order
    pub async fn all(&self, tenant_id: i64) -> Result<Vec<Property>> {
        let sql = format!(
            "SELECT {} FROM properties WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            PROPERTY_COLUMNS
        );
        let rows = sqlx::query_as::<_, PropertyRow>(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Property::from).collect())
    }

    pub async fn create(&self, tenant_id: i64, changes: &PropertyChanges) -> Result<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO properties (
                user_id, title, property_type, status, address, city, state, zip_code,
                price, bedrooms, bathrooms, square_feet, lot_size, year_built,
                mls_number, mls_service, mls_url, description, features,
                owner_client_id, featured, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(tenant_id)
        .bind(&changes.title)
        .bind(changes.property_type.as_str())
        .bind(changes.status.as_str())
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.state)
        .bind(&changes.zip_code)
        .bind(changes.price)
        .bind(changes.bedrooms)
        .bind(changes.bathrooms)
        .bind(changes.square_feet)
        .bind(changes.lot_size)
        .bind(changes.year_built)
        .bind(&changes.mls_number)
        .bind(changes.mls_service_code())
        .bind(&changes.mls_url)
        .bind(&changes.description)
        .bind(&changes.features)
        .bind(changes.owner_client_id)
        .bind(changes.featured)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        info!(tenant_id, property_id = id, "Property created");
        Ok(id)
    }

    pub async fn update(&self, tenant_id: i64, id: i64, changes: &PropertyChanges) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET title = ?, property_type = ?, status = ?, address = ?, city = ?, state = ?,
                zip_code = ?, price = ?, bedrooms = ?, bathrooms = ?, square_feet = ?,
                lot_size = ?, year_built = ?, mls_number = ?, mls_service = ?, mls_url = ?,
                description = ?, features = ?, owner_client_id = ?, featured = ?,
                updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&changes.title)
        .bind(changes.property_type.as_str())
        .bind(changes.status.as_str())
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.state)
        .bind(&changes.zip_code)
        .bind(changes.price)
        .bind(changes.bedrooms)
        .bind(changes.bathrooms)
        .bind(changes.square_feet)
        .bind(changes.lot_size)
        .bind(changes.year_built)
        .bind(&changes.mls_number)
        .bind(changes.mls_service_code())
        .bind(&changes.mls_url)
        .bind(&changes.description)
        .bind(&changes.features)
        .bind(changes.owner_client_id)
        .bind(changes.featured)
        .bind(Utc::now())
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Cascades to the property's transactions and notes
    pub async fn delete(&self, tenant_id: i64, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!(tenant_id, property_id = id, "Property deleted");
        }
        Ok(result.rows_affected() > 0)
    }
}
