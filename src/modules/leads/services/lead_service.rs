use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::core::csv_io::{self, ImportReport, ImportRow};
use crate::core::{AppError, Page, Result};
use crate::modules::clients::{Client, ClientRepository};
use crate::modules::leads::models::{self, Lead, LeadDetail, LeadInput, LeadListQuery};
use crate::modules::leads::repositories::{ConversionOutcome, LeadRepository};
use crate::modules::notes::{Note, NoteInput, NoteRepository, NoteTarget};

/// Response of the convert operation
#[derive(Debug, Clone, Serialize)]
pub struct LeadConversion {
    pub client: Client,
    /// false when the lead had already been converted
    pub created: bool,
}

pub struct LeadService {
    lead_repo: Arc<LeadRepository>,
    client_repo: Arc<ClientRepository>,
    note_repo: Arc<NoteRepository>,
}

impl LeadService {
    pub fn new(
        lead_repo: Arc<LeadRepository>,
        client_repo: Arc<ClientRepository>,
        note_repo: Arc<NoteRepository>,
    ) -> Self {
        Self {
            lead_repo,
            client_repo,
            note_repo,
        }
    }

    pub async fn list_leads(&self, tenant_id: i64, query: &LeadListQuery) -> Result<Page<Lead>> {
        self.lead_repo.list(tenant_id, query).await
    }

    pub async fn get_lead(&self, tenant_id: i64, id: i64) -> Result<LeadDetail> {
        let lead = self.require(tenant_id, id).await?;
        let note_history = self.note_repo.list(NoteTarget::Lead, id).await?;
        Ok(LeadDetail { lead, note_history })
    }

    pub async fn create_lead(&self, tenant_id: i64, input: LeadInput) -> Result<Lead> {
        let changes = input.validate()?;
        let id = self.lead_repo.create(tenant_id, &changes).await?;
        self.require(tenant_id, id).await
    }

    pub async fn update_lead(&self, tenant_id: i64, id: i64, input: LeadInput) -> Result<Lead> {
        let changes = input.validate()?;
        if !self.lead_repo.update(tenant_id, id, &changes).await? {
            return Err(lead_not_found(id));
        }
        self.require(tenant_id, id).await
    }

    pub async fn delete_lead(&self, tenant_id: i64, id: i64) -> Result<()> {
        if !self.lead_repo.delete(tenant_id, id).await? {
            return Err(lead_not_found(id));
        }
        Ok(())
    }

    /// Promote a lead to a client. Repeating the call returns the same client.
    pub async fn convert_to_client(&self, tenant_id: i64, id: i64) -> Result<LeadConversion> {
        let outcome = self
            .lead_repo
            .convert_to_client(tenant_id, id)
            .await?
            .ok_or_else(|| lead_not_found(id))?;

        let client_id = outcome.client_id();
        let client = self
            .client_repo
            .find_by_id(tenant_id, client_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Client {} not found", client_id)))?;

        Ok(LeadConversion {
            client,
            created: matches!(outcome, ConversionOutcome::Created(_)),
        })
    }

    pub async fn export_leads(&self, tenant_id: i64) -> Result<Vec<u8>> {
        let leads = self.lead_repo.all(tenant_id).await?;
        info!(tenant_id, rows = leads.len(), "Exporting leads");
        csv_io::write_csv(models::EXPORT_COLUMNS, leads.iter().map(Lead::export_row))
    }

    pub async fn import_leads(&self, tenant_id: i64, file: &[u8]) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        for row in csv_io::read_csv(file, models::EXPORT_COLUMNS)? {
            let outcome = self.import_row(tenant_id, &row).await;
            report.record(row.number, outcome)?;
        }
        info!(
            tenant_id,
            created = report.created,
            failed = report.errors.len(),
            "Imported leads"
        );
        Ok(report)
    }

    async fn import_row(&self, tenant_id: i64, row: &ImportRow) -> Result<()> {
        let changes = models::parse_import(row)?;
        self.lead_repo.create(tenant_id, &changes).await?;
        Ok(())
    }

    pub async fn add_note(&self, tenant_id: i64, id: i64, input: NoteInput) -> Result<Note> {
        let body = input.validate()?;
        self.note_repo.add(NoteTarget::Lead, id, tenant_id, &body).await
    }

    async fn require(&self, tenant_id: i64, id: i64) -> Result<Lead> {
        self.lead_repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| lead_not_found(id))
    }
}

fn lead_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Lead {} not found", id))
}
