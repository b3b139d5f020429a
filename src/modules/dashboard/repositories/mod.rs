mod dashboard_repository;

pub use dashboard_repository::{DashboardRepository, MySqlDashboardRepository};
