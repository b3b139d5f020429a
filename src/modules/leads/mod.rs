// Leads module: prospects not yet promoted to clients

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Lead, LeadReferral, LeadStatus};
pub use repositories::LeadRepository;
pub use services::LeadService;
