// Contacts module: vendors, lenders, other agents and similar professionals

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Contact, ContactType};
pub use repositories::ContactRepository;
pub use services::ContactService;
