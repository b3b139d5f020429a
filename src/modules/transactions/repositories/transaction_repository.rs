use chrono::Utc;
use sqlx::{FromRow, MySqlPool};
use tracing::{debug, info};

use crate::core::pagination::{like_pattern, normalize_page, offset_for, PAGE_SIZE};
use crate::core::{Page, Result};
use crate::modules::transactions::models::{
    MilestoneInput, NewParty, TaskInput, Transaction, TransactionChanges, TransactionListQuery,
    TransactionMilestone, TransactionMilestoneRow, TransactionParty, TransactionPartyRow,
    TransactionRow, TransactionSummary, TransactionTask,
};

const TRANSACTION_COLUMNS: &str = "t.id, t.property_id, t.status, t.representation, \
     t.commission_percentage, t.final_sales_price, t.file_number, t.lockbox_code, \
     t.showing_instructions, t.listing_date, t.created_at, t.updated_at";

/// List row: transaction columns plus the owning property
#[derive(Debug, FromRow)]
struct TransactionListRow {
    #[sqlx(flatten)]
    transaction: TransactionRow,
    property_title: String,
    property_address: String,
}

/// Repository for transactions and their child records.
///
/// Transactions carry no tenant column; every query joins `properties` and
/// filters on `p.user_id`.
pub struct TransactionRepository {
    pool: MySqlPool,
}

impl TransactionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Tenant's transactions, newest first
    pub async fn list(
        &self,
        tenant_id: i64,
        query: &TransactionListQuery,
    ) -> Result<Page<TransactionSummary>> {
        let page = normalize_page(query.page);
        let pattern = like_pattern(query.q.as_deref());
        let status = query.status.as_deref().filter(|s| !s.is_empty());
        let representation = query.representation.as_deref().filter(|s| !s.is_empty());

        let filters = r#"
            FROM transactions t
            INNER JOIN properties p ON p.id = t.property_id
            WHERE p.user_id = ?
              AND (? IS NULL OR t.status = ?)
              AND (? IS NULL OR t.representation = ?)
              AND (? IS NULL
                   OR t.file_number LIKE ?
                   OR p.title LIKE ?
                   OR p.address LIKE ?
                   OR p.city LIKE ?
                   OR p.mls_number LIKE ?)
        "#;

        let count_sql = format!("SELECT COUNT(*) {}", filters);
        let (total,): (i64,) = sqlx::query_as(&count_sql)
            .bind(tenant_id)
            .bind(status)
            .bind(status)
            .bind(representation)
            .bind(representation)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        let list_sql = format!(
            "SELECT {}, p.title AS property_title, p.address AS property_address {} \
             ORDER BY t.updated_at DESC, t.id DESC LIMIT ? OFFSET ?",
            TRANSACTION_COLUMNS, filters
        );
        let rows = sqlx::query_as::<_, TransactionListRow>(&list_sql)
            .bind(tenant_id)
            .bind(status)
            .bind(status)
            .bind(representation)
            .bind(representation)
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

        debug!(tenant_id, total, page, "Listed transactions");

        let data = rows
            .into_iter()
            .map(|row| {
                let transaction = Transaction::from(row.transaction);
                let gci = transaction.gci();
                TransactionSummary {
                    transaction,
                    property_title: row.property_title,
                    property_address: row.property_address,
                    gci,
                }
            })
            .collect();

        Ok(Page::new(data, page, total))
    }

    /// Find a transaction the tenant can reach
    pub async fn find_by_id(&self, tenant_id: i64, id: i64) -> Result<Option<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions t \
             INNER JOIN properties p ON p.id = t.property_id \
             WHERE t.id = ? AND p.user_id = ?",
            TRANSACTION_COLUMNS
        );
        let row = sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Transaction::from))
    }

    pub async fn property_owned(&self, tenant_id: i64, property_id: i64) -> Result<bool> {
        let found: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM properties WHERE id = ? AND user_id = ?")
                .bind(property_id)
                .bind(tenant_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    pub async fn client_owned(&self, tenant_id: i64, client_id: i64) -> Result<bool> {
        let found: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM clients WHERE id = ? AND user_id = ?")
                .bind(client_id)
                .bind(tenant_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    /// Insert a transaction. The caller has checked property ownership.
    pub async fn create(&self, tenant_id: i64, changes: &TransactionChanges) -> Result<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (
                property_id, status, representation, commission_percentage,
                final_sales_price, file_number, lockbox_code, showing_instructions,
                listing_date, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(changes.property_id)
        .bind(changes.status.as_str())
        .bind(changes.representation.as_str())
        .bind(changes.commission_percentage)
        .bind(changes.final_sales_price)
        .bind(&changes.file_number)
        .bind(&changes.lockbox_code)
        .bind(&changes.showing_instructions)
        .bind(changes.listing_date)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        info!(tenant_id, transaction_id = id, status = %changes.status, "Transaction created");
        Ok(id)
    }

    /// Overwrite a transaction and refresh `updated_at`.
    /// Returns false when the row is missing or foreign.
    pub async fn update(
        &self,
        tenant_id: i64,
        id: i64,
        changes: &TransactionChanges,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE transactions t
            INNER JOIN properties p ON p.id = t.property_id
            SET t.property_id = ?, t.status = ?, t.representation = ?,
                t.commission_percentage = ?, t.final_sales_price = ?,
                t.file_number = ?, t.lockbox_code = ?, t.showing_instructions = ?,
                t.listing_date = ?, t.updated_at = ?
            WHERE t.id = ? AND p.user_id = ?
            "#,
        )
        .bind(changes.property_id)
        .bind(changes.status.as_str())
        .bind(changes.representation.as_str())
        .bind(changes.commission_percentage)
        .bind(changes.final_sales_price)
        .bind(&changes.file_number)
        .bind(&changes.lockbox_code)
        .bind(&changes.showing_instructions)
        .bind(changes.listing_date)
        .bind(Utc::now())
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(tenant_id, transaction_id = id, status = %changes.status, "Transaction updated");
        }
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, tenant_id: i64, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE t FROM transactions t
            INNER JOIN properties p ON p.id = t.property_id
            WHERE t.id = ? AND p.user_id = ?
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(tenant_id, transaction_id = id, "Transaction deleted");
        }
        Ok(result.rows_affected() > 0)
    }

    /// Property title and address for the detail view
    pub async fn property_label(&self, property_id: i64) -> Result<(String, String)> {
        let label: (String, String) =
            sqlx::query_as("SELECT title, address FROM properties WHERE id = ?")
                .bind(property_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(label)
    }

    // Child records. Callers resolve the parent through `find_by_id` first.

    pub async fn parties(&self, transaction_id: i64) -> Result<Vec<TransactionParty>> {
        let rows = sqlx::query_as::<_, TransactionPartyRow>(
            r#"
            SELECT tp.id, tp.transaction_id, tp.client_id, tp.role, tp.display_name,
                   tp.email, tp.phone,
                   c.first_name AS client_first_name, c.last_name AS client_last_name,
                   c.email AS client_email, c.phone AS client_phone
            FROM transaction_parties tp
            LEFT JOIN clients c ON c.id = tp.client_id
            WHERE tp.transaction_id = ?
            ORDER BY tp.role, tp.id
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TransactionParty::from).collect())
    }

    pub async fn add_party(&self, transaction_id: i64, party: &NewParty) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO transaction_parties (transaction_id, client_id, role, display_name, email, phone)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(transaction_id)
        .bind(party.client_id)
        .bind(party.role.as_str())
        .bind(&party.display_name)
        .bind(&party.email)
        .bind(&party.phone)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    pub async fn delete_party(&self, transaction_id: i64, party_id: i64) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM transaction_parties WHERE id = ? AND transaction_id = ?")
                .bind(party_id)
                .bind(transaction_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn milestones(&self, transaction_id: i64) -> Result<Vec<TransactionMilestone>> {
        let rows = sqlx::query_as::<_, TransactionMilestoneRow>(
            r#"
            SELECT id, transaction_id, kind, label, date, status, is_critical, sort_order
            FROM transaction_milestones
            WHERE transaction_id = ?
            ORDER BY sort_order, date, id
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TransactionMilestone::from).collect())
    }

    pub async fn add_milestone(&self, transaction_id: i64, milestone: &MilestoneInput) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO transaction_milestones
                (transaction_id, kind, label, date, status, is_critical, sort_order)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(transaction_id)
        .bind(milestone.kind.as_str())
        .bind(milestone.label.as_deref().unwrap_or_default())
        .bind(milestone.date)
        .bind(milestone.status.as_str())
        .bind(milestone.is_critical)
        .bind(milestone.sort_order)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    pub async fn tasks(&self, transaction_id: i64) -> Result<Vec<TransactionTask>> {
        let tasks = sqlx::query_as::<_, TransactionTask>(
            r#"
            SELECT id, transaction_id, description, due_date, completed, sort_order
            FROM transaction_tasks
            WHERE transaction_id = ?
            ORDER BY sort_order, due_date, id
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn add_task(&self, transaction_id: i64, task: &TaskInput) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO transaction_tasks (transaction_id, description, due_date, sort_order)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(transaction_id)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.sort_order)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    /// Flip a task's completed flag; returns the new value
    pub async fn toggle_task(&self, transaction_id: i64, task_id: i64) -> Result<Option<bool>> {
        let mut tx = self.pool.begin().await?;

        let current: Option<(bool,)> = sqlx::query_as(
            "SELECT completed FROM transaction_tasks WHERE id = ? AND transaction_id = ? FOR UPDATE",
        )
        .bind(task_id)
        .bind(transaction_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((completed,)) = current else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("UPDATE transaction_tasks SET completed = ? WHERE id = ?")
            .bind(!completed)
            .bind(task_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(!completed))
    }

    pub async fn delete_task(&self, transaction_id: i64, task_id: i64) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM transaction_tasks WHERE id = ? AND transaction_id = ?")
                .bind(task_id)
                .bind(transaction_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
