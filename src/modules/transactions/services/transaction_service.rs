use std::sync::Arc;

use tracing::{info, warn};

use crate::core::{AppError, Page, Result};
use crate::modules::notes::{Note, NoteInput, NoteRepository, NoteTarget};
use crate::modules::transactions::models::{
    MilestoneInput, PartyInput, TaskInput, Transaction, TransactionDetail, TransactionInput,
    TransactionListQuery, TransactionMilestone, TransactionParty, TransactionSummary,
    TransactionTask,
};
use crate::modules::transactions::repositories::TransactionRepository;

/// Transaction business logic.
///
/// Every operation first resolves the transaction through the tenant's
/// properties, so a foreign id behaves exactly like a missing one.
pub struct TransactionService {
    transaction_repo: Arc<TransactionRepository>,
    note_repo: Arc<NoteRepository>,
}

impl TransactionService {
    pub fn new(transaction_repo: Arc<TransactionRepository>, note_repo: Arc<NoteRepository>) -> Self {
        Self {
            transaction_repo,
            note_repo,
        }
    }

    pub async fn list_transactions(
        &self,
        tenant_id: i64,
        query: &TransactionListQuery,
    ) -> Result<Page<TransactionSummary>> {
        self.transaction_repo.list(tenant_id, query).await
    }

    pub async fn get_transaction(&self, tenant_id: i64, id: i64) -> Result<TransactionDetail> {
        let transaction = self.require(tenant_id, id).await?;

        let (property_title, property_address) = self
            .transaction_repo
            .property_label(transaction.property_id)
            .await?;
        let parties = self.transaction_repo.parties(id).await?;
        let milestones = self.transaction_repo.milestones(id).await?;
        let tasks = self.transaction_repo.tasks(id).await?;
        let notes = self.note_repo.list(NoteTarget::Transaction, id).await?;

        Ok(TransactionDetail {
            gci: transaction.gci(),
            transaction,
            property_title,
            property_address,
            parties,
            milestones,
            tasks,
            notes,
        })
    }

    pub async fn create_transaction(
        &self,
        tenant_id: i64,
        input: TransactionInput,
    ) -> Result<Transaction> {
        let changes = input.validate()?;
        self.require_property(tenant_id, changes.property_id).await?;

        let id = self.transaction_repo.create(tenant_id, &changes).await?;
        self.require(tenant_id, id).await
    }

    /// Replace a transaction's fields. Always refreshes `updated_at`, which
    /// moves a closed deal into the current month on the dashboard.
    pub async fn update_transaction(
        &self,
        tenant_id: i64,
        id: i64,
        input: TransactionInput,
    ) -> Result<Transaction> {
        let changes = input.validate()?;
        let existing = self.require(tenant_id, id).await?;

        if existing.property_id != changes.property_id {
            self.require_property(tenant_id, changes.property_id).await?;
        }
        if existing.is_closed() {
            warn!(
                tenant_id,
                transaction_id = id,
                "Editing a closed transaction moves it to the current dashboard month"
            );
        }

        if !self.transaction_repo.update(tenant_id, id, &changes).await? {
            return Err(transaction_not_found(id));
        }
        self.require(tenant_id, id).await
    }

    pub async fn delete_transaction(&self, tenant_id: i64, id: i64) -> Result<()> {
        if !self.transaction_repo.delete(tenant_id, id).await? {
            return Err(transaction_not_found(id));
        }
        Ok(())
    }

    pub async fn add_party(
        &self,
        tenant_id: i64,
        transaction_id: i64,
        input: PartyInput,
    ) -> Result<TransactionParty> {
        let party = input.validate()?;
        self.require(tenant_id, transaction_id).await?;

        if let Some(client_id) = party.client_id {
            if !self.transaction_repo.client_owned(tenant_id, client_id).await? {
                return Err(AppError::not_found(format!("Client {} not found", client_id)));
            }
        }

        let party_id = self.transaction_repo.add_party(transaction_id, &party).await?;
        info!(tenant_id, transaction_id, party_id, role = %party.role, "Party added");

        self.transaction_repo
            .parties(transaction_id)
            .await?
            .into_iter()
            .find(|p| p.id == party_id)
            .ok_or_else(|| AppError::internal("Party was created but not found"))
    }

    pub async fn delete_party(&self, tenant_id: i64, transaction_id: i64, party_id: i64) -> Result<()> {
        self.require(tenant_id, transaction_id).await?;

        if !self.transaction_repo.delete_party(transaction_id, party_id).await? {
            return Err(AppError::not_found(format!("Party {} not found", party_id)));
        }
        Ok(())
    }

    pub async fn add_milestone(
        &self,
        tenant_id: i64,
        transaction_id: i64,
        input: MilestoneInput,
    ) -> Result<TransactionMilestone> {
        let milestone = input.validate()?;
        self.require(tenant_id, transaction_id).await?;

        let milestone_id = self
            .transaction_repo
            .add_milestone(transaction_id, &milestone)
            .await?;

        self.transaction_repo
            .milestones(transaction_id)
            .await?
            .into_iter()
            .find(|m| m.id == milestone_id)
            .ok_or_else(|| AppError::internal("Milestone was created but not found"))
    }

    pub async fn add_task(
        &self,
        tenant_id: i64,
        transaction_id: i64,
        input: TaskInput,
    ) -> Result<TransactionTask> {
        let task = input.validate()?;
        self.require(tenant_id, transaction_id).await?;

        let task_id = self.transaction_repo.add_task(transaction_id, &task).await?;
        self.find_task(transaction_id, task_id).await
    }

    pub async fn toggle_task(
        &self,
        tenant_id: i64,
        transaction_id: i64,
        task_id: i64,
    ) -> Result<TransactionTask> {
        self.require(tenant_id, transaction_id).await?;

        if self
            .transaction_repo
            .toggle_task(transaction_id, task_id)
            .await?
            .is_none()
        {
            return Err(task_not_found(task_id));
        }
        self.find_task(transaction_id, task_id).await
    }

    pub async fn delete_task(&self, tenant_id: i64, transaction_id: i64, task_id: i64) -> Result<()> {
        self.require(tenant_id, transaction_id).await?;

        if !self.transaction_repo.delete_task(transaction_id, task_id).await? {
            return Err(task_not_found(task_id));
        }
        Ok(())
    }

    pub async fn add_note(
        &self,
        tenant_id: i64,
        transaction_id: i64,
        input: NoteInput,
    ) -> Result<Note> {
        let body = input.validate()?;
        self.note_repo
            .add(NoteTarget::Transaction, transaction_id, tenant_id, &body)
            .await
    }

    async fn require(&self, tenant_id: i64, id: i64) -> Result<Transaction> {
        self.transaction_repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| transaction_not_found(id))
    }

    async fn require_property(&self, tenant_id: i64, property_id: i64) -> Result<()> {
        if !self
            .transaction_repo
            .property_owned(tenant_id, property_id)
            .await?
        {
            return Err(AppError::not_found(format!("Property {} not found", property_id)));
        }
        Ok(())
    }

    async fn find_task(&self, transaction_id: i64, task_id: i64) -> Result<TransactionTask> {
        self.transaction_repo
            .tasks(transaction_id)
            .await?
            .into_iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| task_not_found(task_id))
    }
}

fn transaction_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Transaction {} not found", id))
}

fn task_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Task {} not found", id))
}
