pub mod clients;
pub mod contacts;
pub mod dashboard;
pub mod health;
pub mod leads;
pub mod notes;
pub mod properties;
pub mod settings;
pub mod transactions;

use actix_web::web;

/// Register every module's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(dashboard::controllers::configure)
        .configure(clients::controllers::configure)
        .configure(leads::controllers::configure)
        .configure(contacts::controllers::configure)
        .configure(properties::controllers::configure)
        .configure(transactions::controllers::configure)
        .configure(settings::controllers::configure);
}
