// Shared test infrastructure.
//
// `dashboard_store` is an in-memory `DashboardRepository` for tests that do
// not need MySQL. The database helpers connect to TEST_DATABASE_URL; tests
// using them are marked #[ignore] and run with `--ignored`.
#![allow(dead_code)]

pub mod dashboard_store;
pub mod test_data;
pub mod test_database;
pub mod test_server;

pub use dashboard_store::*;
pub use test_data::*;
pub use test_database::*;
pub use test_server::*;
