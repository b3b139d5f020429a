use std::sync::Arc;

use tracing::info;

use crate::core::csv_io::{self, ImportReport, ImportRow};
use crate::core::{AppError, Page, Result};
use crate::modules::clients::ClientRepository;
use crate::modules::notes::{Note, NoteInput, NoteRepository, NoteTarget};
use crate::modules::properties::models::{
    self, Property, PropertyChanges, PropertyDetail, PropertyInput, PropertyListQuery,
};
use crate::modules::properties::repositories::PropertyRepository;

pub struct PropertyService {
    property_repo: Arc<PropertyRepository>,
    client_repo: Arc<ClientRepository>,
    note_repo: Arc<NoteRepository>,
}

impl PropertyService {
    pub fn new(
        property_repo: Arc<PropertyRepository>,
        client_repo: Arc<ClientRepository>,
        note_repo: Arc<NoteRepository>,
    ) -> Self {
        Self {
            property_repo,
            client_repo,
            note_repo,
        }
    }

    pub async fn list_properties(
        &self,
        tenant_id: i64,
        query: &PropertyListQuery,
    ) -> Result<Page<Property>> {
        self.property_repo.list(tenant_id, query).await
    }

    pub async fn get_property(&self, tenant_id: i64, id: i64) -> Result<PropertyDetail> {
        let property = self.require(tenant_id, id).await?;
        let note_history = self.note_repo.list(NoteTarget::Property, id).await?;
        Ok(PropertyDetail {
            property,
            note_history,
        })
    }

    pub async fn create_property(&self, tenant_id: i64, input: PropertyInput) -> Result<Property> {
        let changes = input.validate()?;
        self.check_owner(tenant_id, &changes).await?;

        let id = self.property_repo.create(tenant_id, &changes).await?;
        self.require(tenant_id, id).await
    }

    pub async fn update_property(
        &self,
        tenant_id: i64,
        id: i64,
        input: PropertyInput,
    ) -> Result<Property> {
        let changes = input.validate()?;
        self.check_owner(tenant_id, &changes).await?;

        if !self.property_repo.update(tenant_id, id, &changes).await? {
            return Err(property_not_found(id));
        }
        self.require(tenant_id, id).await
    }

    pub async fn delete_property(&self, tenant_id: i64, id: i64) -> Result<()> {
        if !self.property_repo.delete(tenant_id, id).await? {
            return Err(property_not_found(id));
        }
        Ok(())
    }

    pub async fn export_properties(&self, tenant_id: i64) -> Result<Vec<u8>> {
        let properties = self.property_repo.all(tenant_id).await?;
        info!(tenant_id, rows = properties.len(), "Exporting properties");
        csv_io::write_csv(models::EXPORT_COLUMNS, properties.iter().map(Property::export_row))
    }

    /// Imported properties never carry an owner; link one afterwards with an update.
    pub async fn import_properties(&self, tenant_id: i64, file: &[u8]) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        for row in csv_io::read_csv(file, models::EXPORT_COLUMNS)? {
            let outcome = self.import_row(tenant_id, &row).await;
            report.record(row.number, outcome)?;
        }
        info!(
            tenant_id,
            created = report.created,
            failed = report.errors.len(),
            "Imported properties"
        );
        Ok(report)
    }

    async fn import_row(&self, tenant_id: i64, row: &ImportRow) -> Result<()> {
        let changes = models::parse_import(row)?;
        self.property_repo.create(tenant_id, &changes).await?;
        Ok(())
    }

    pub async fn add_note(&self, tenant_id: i64, id: i64, input: NoteInput) -> Result<Note> {
        let body = input.validate()?;
        self.note_repo
            .add(NoteTarget::Property, id, tenant_id, &body)
            .await
    }

    /// The owner, when given, must be one of the tenant's own clients
    async fn check_owner(&self, tenant_id: i64, changes: &PropertyChanges) -> Result<()> {
        let Some(client_id) = changes.owner_client_id else {
            return Ok(());
        };
        if self.client_repo.find_by_id(tenant_id, client_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "owner_client_id {} is not one of your clients",
                client_id
            )));
        }
        Ok(())
    }

    async fn require(&self, tenant_id: i64, id: i64) -> Result<Property> {
        self.property_repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| property_not_found(id))
    }
}

fn property_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Property {} not found", id))
}
