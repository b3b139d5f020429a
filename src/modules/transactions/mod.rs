// Transactions module: deals, their parties, milestones and tasks

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Representation, Transaction, TransactionStatus};
pub use repositories::TransactionRepository;
pub use services::TransactionService;
