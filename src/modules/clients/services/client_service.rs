use std::sync::Arc;

use tracing::info;

use crate::core::csv_io::{self, ImportReport, ImportRow};
use crate::core::{AppError, Page, Result};
use crate::modules::clients::models::{self, Client, ClientDetail, ClientInput, ClientListQuery};
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::notes::{Note, NoteInput, NoteRepository, NoteTarget};

pub struct ClientService {
    client_repo: Arc<ClientRepository>,
    note_repo: Arc<NoteRepository>,
}

impl ClientService {
    pub fn new(client_repo: Arc<ClientRepository>, note_repo: Arc<NoteRepository>) -> Self {
        Self {
            client_repo,
            note_repo,
        }
    }

    pub async fn list_clients(&self, tenant_id: i64, query: &ClientListQuery) -> Result<Page<Client>> {
        self.client_repo.list(tenant_id, query).await
    }

    pub async fn get_client(&self, tenant_id: i64, id: i64) -> Result<ClientDetail> {
        let client = self.require(tenant_id, id).await?;
        let note_history = self.note_repo.list(NoteTarget::Client, id).await?;

        Ok(ClientDetail {
            client,
            note_history,
        })
    }

    pub async fn create_client(&self, tenant_id: i64, input: ClientInput) -> Result<Client> {
        let changes = input.validate()?;
        let id = self.client_repo.create(tenant_id, &changes).await?;
        self.require(tenant_id, id).await
    }

    pub async fn update_client(&self, tenant_id: i64, id: i64, input: ClientInput) -> Result<Client> {
        let changes = input.validate()?;
        if !self.client_repo.update(tenant_id, id, &changes).await? {
            return Err(client_not_found(id));
        }
        self.require(tenant_id, id).await
    }

    pub async fn delete_client(&self, tenant_id: i64, id: i64) -> Result<()> {
        if !self.client_repo.delete(tenant_id, id).await? {
            return Err(client_not_found(id));
        }
        Ok(())
    }

    pub async fn export_clients(&self, tenant_id: i64) -> Result<Vec<u8>> {
        let clients = self.client_repo.all(tenant_id).await?;
        info!(tenant_id, rows = clients.len(), "Exporting clients");
        csv_io::write_csv(models::EXPORT_COLUMNS, clients.iter().map(Client::export_row))
    }

    pub async fn import_clients(&self, tenant_id: i64, file: &[u8]) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        for row in csv_io::read_csv(file, models::EXPORT_COLUMNS)? {
            let outcome = self.import_row(tenant_id, &row).await;
            report.record(row.number, outcome)?;
        }
        info!(
            tenant_id,
            created = report.created,
            failed = report.errors.len(),
            "Imported clients"
        );
        Ok(report)
    }

    async fn import_row(&self, tenant_id: i64, row: &ImportRow) -> Result<()> {
        let changes = models::parse_import(row)?;
        self.client_repo.create(tenant_id, &changes).await?;
        Ok(())
    }

    pub async fn add_note(&self, tenant_id: i64, id: i64, input: NoteInput) -> Result<Note> {
        let body = input.validate()?;
        self.note_repo
            .add(NoteTarget::Client, id, tenant_id, &body)
            .await
    }

    async fn require(&self, tenant_id: i64, id: i64) -> Result<Client> {
        self.client_repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| client_not_found(id))
    }
}

fn client_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Client {} not found", id))
}
