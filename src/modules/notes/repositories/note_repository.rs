use chrono::Utc;
use sqlx::MySqlPool;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::notes::models::{Note, NoteTarget};

/// Note persistence for every record kind
pub struct NoteRepository {
    pool: MySqlPool,
}

impl NoteRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Whether the parent record exists and belongs to the tenant
    pub async fn parent_owned(
        &self,
        target: NoteTarget,
        parent_id: i64,
        tenant_id: i64,
    ) -> Result<bool> {
        let found: Option<(i64,)> = sqlx::query_as(target.ownership_query())
            .bind(parent_id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Append a note; NotFound when the parent is missing or foreign
    pub async fn add(
        &self,
        target: NoteTarget,
        parent_id: i64,
        tenant_id: i64,
        body: &str,
    ) -> Result<Note> {
        if !self.parent_owned(target, parent_id, tenant_id).await? {
            return Err(AppError::not_found(format!(
                "{} {} not found",
                target.resource_name(),
                parent_id
            )));
        }

        let created_at = Utc::now();
        let sql = format!(
            "INSERT INTO {} ({}, body, created_at) VALUES (?, ?, ?)",
            target.table(),
            target.parent_column()
        );
        let result = sqlx::query(&sql)
            .bind(parent_id)
            .bind(body)
            .bind(created_at)
            .execute(&self.pool)
            .await?;

        info!(
            table = target.table(),
            parent_id,
            tenant_id,
            "Note added"
        );

        Ok(Note {
            id: result.last_insert_id() as i64,
            body: body.to_string(),
            created_at,
        })
    }

    /// Notes for a parent the caller has already resolved, newest first
    pub async fn list(&self, target: NoteTarget, parent_id: i64) -> Result<Vec<Note>> {
        let sql = format!(
            "SELECT id, body, created_at FROM {} WHERE {} = ? ORDER BY created_at DESC, id DESC",
            target.table(),
            target.parent_column()
        );
        let notes = sqlx::query_as::<_, Note>(&sql)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(notes)
    }
}
