//! Application wiring shared by the binary and the integration tests.

use std::sync::Arc;

use actix_web::web;
use sqlx::MySqlPool;

use crate::core::AppTimezone;
use crate::middleware::MetricsCollector;
use crate::modules::clients::{ClientRepository, ClientService};
use crate::modules::contacts::{ContactRepository, ContactService};
use crate::modules::dashboard::{DashboardService, MySqlDashboardRepository};
use crate::modules::leads::{LeadRepository, LeadService};
use crate::modules::notes::NoteRepository;
use crate::modules::properties::{PropertyRepository, PropertyService};
use crate::modules::settings::SettingsRepository;
use crate::modules::transactions::{TransactionRepository, TransactionService};

/// Repositories and services built once per process and cloned into each
/// worker's `App`.
#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
    pub metrics: MetricsCollector,
    pub settings: Arc<SettingsRepository>,
    pub clients: Arc<ClientService>,
    pub leads: Arc<LeadService>,
    pub contacts: Arc<ContactService>,
    pub properties: Arc<PropertyService>,
    pub transactions: Arc<TransactionService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    pub fn new(pool: MySqlPool, timezone: AppTimezone) -> Self {
        let note_repo = Arc::new(NoteRepository::new(pool.clone()));
        let client_repo = Arc::new(ClientRepository::new(pool.clone()));
        let lead_repo = Arc::new(LeadRepository::new(pool.clone(), client_repo.clone()));
        let contact_repo = Arc::new(ContactRepository::new(pool.clone()));
        let property_repo = Arc::new(PropertyRepository::new(pool.clone()));
        let transaction_repo = Arc::new(TransactionRepository::new(pool.clone()));
        let dashboard_repo = Arc::new(MySqlDashboardRepository::new(pool.clone()));

        Self {
            metrics: MetricsCollector::new(),
            settings: Arc::new(SettingsRepository::new(pool.clone())),
            clients: Arc::new(ClientService::new(client_repo.clone(), note_repo.clone())),
            leads: Arc::new(LeadService::new(
                lead_repo,
                client_repo.clone(),
                note_repo.clone(),
            )),
            contacts: Arc::new(ContactService::new(contact_repo, note_repo.clone())),
            properties: Arc::new(PropertyService::new(
                property_repo,
                client_repo,
                note_repo.clone(),
            )),
            transactions: Arc::new(TransactionService::new(transaction_repo, note_repo)),
            dashboard: Arc::new(DashboardService::new(dashboard_repo, timezone)),
            pool,
        }
    }

    /// Register shared data and all routes. Middleware is left to the caller.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.pool.clone()))
            .app_data(web::Data::new(self.metrics.clone()))
            .app_data(web::Data::new(self.settings.clone()))
            .app_data(web::Data::new(self.clients.clone()))
            .app_data(web::Data::new(self.leads.clone()))
            .app_data(web::Data::new(self.contacts.clone()))
            .app_data(web::Data::new(self.properties.clone()))
            .app_data(web::Data::new(self.transactions.clone()))
            .app_data(web::Data::new(self.dashboard.clone()))
            .configure(crate::modules::configure);
    }
}
