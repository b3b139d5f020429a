//! RealtyDesk CRM service library
//!
//! Multi-tenant real-estate CRM: clients, leads, contacts, properties and
//! transactions, plus a dashboard that buckets closed-deal commission income
//! and sales volume by calendar month.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

pub use app::AppState;
pub use modules::dashboard;
pub use modules::transactions;
