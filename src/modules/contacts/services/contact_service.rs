use std::sync::Arc;

use tracing::info;

use crate::core::csv_io::{self, ImportReport, ImportRow};
use crate::core::{AppError, Page, Result};
use crate::modules::contacts::models::{self, Contact, ContactDetail, ContactInput, ContactListQuery};
use crate::modules::contacts::repositories::ContactRepository;
use crate::modules::notes::{Note, NoteInput, NoteRepository, NoteTarget};

pub struct ContactService {
    contact_repo: Arc<ContactRepository>,
    note_repo: Arc<NoteRepository>,
}

impl ContactService {
    pub fn new(contact_repo: Arc<ContactRepository>, note_repo: Arc<NoteRepository>) -> Self {
        Self {
            contact_repo,
            note_repo,
        }
    }

    pub async fn list_contacts(
        &self,
        tenant_id: i64,
        query: &ContactListQuery,
    ) -> Result<Page<Contact>> {
        self.contact_repo.list(tenant_id, query).await
    }

    pub async fn get_contact(&self, tenant_id: i64, id: i64) -> Result<ContactDetail> {
        let contact = self.require(tenant_id, id).await?;
        let note_history = self.note_repo.list(NoteTarget::Contact, id).await?;
        Ok(ContactDetail {
            contact,
            note_history,
        })
    }

    pub async fn create_contact(&self, tenant_id: i64, input: ContactInput) -> Result<Contact> {
        let changes = input.validate()?;
        let id = self.contact_repo.create(tenant_id, &changes).await?;
        self.require(tenant_id, id).await
    }

    pub async fn update_contact(
        &self,
        tenant_id: i64,
        id: i64,
        input: ContactInput,
    ) -> Result<Contact> {
        let changes = input.validate()?;
        if !self.contact_repo.update(tenant_id, id, &changes).await? {
            return Err(contact_not_found(id));
        }
        self.require(tenant_id, id).await
    }

    pub async fn delete_contact(&self, tenant_id: i64, id: i64) -> Result<()> {
        if !self.contact_repo.delete(tenant_id, id).await? {
            return Err(contact_not_found(id));
        }
        Ok(())
    }

    pub async fn export_contacts(&self, tenant_id: i64) -> Result<Vec<u8>> {
        let contacts = self.contact_repo.all(tenant_id).await?;
        info!(tenant_id, rows = contacts.len(), "Exporting contacts");
        csv_io::write_csv(models::EXPORT_COLUMNS, contacts.iter().map(Contact::export_row))
    }

    pub async fn import_contacts(&self, tenant_id: i64, file: &[u8]) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        for row in csv_io::read_csv(file, models::EXPORT_COLUMNS)? {
            let outcome = self.import_row(tenant_id, &row).await;
            report.record(row.number, outcome)?;
        }
        info!(
            tenant_id,
            created = report.created,
            failed = report.errors.len(),
            "Imported contacts"
        );
        Ok(report)
    }

    async fn import_row(&self, tenant_id: i64, row: &ImportRow) -> Result<()> {
        let changes = models::parse_import(row)?;
        self.contact_repo.create(tenant_id, &changes).await?;
        Ok(())
    }

    pub async fn add_note(&self, tenant_id: i64, id: i64, input: NoteInput) -> Result<Note> {
        let body = input.validate()?;
        self.note_repo
            .add(NoteTarget::Contact, id, tenant_id, &body)
            .await
    }

    async fn require(&self, tenant_id: i64, id: i64) -> Result<Contact> {
        self.contact_repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| contact_not_found(id))
    }
}

fn contact_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Contact {} not found", id))
}
