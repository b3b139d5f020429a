// Clients module: buyers and sellers the agent works with

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Client, ClientStatus, ClientType};
pub use repositories::ClientRepository;
pub use services::ClientService;
