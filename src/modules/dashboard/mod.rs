// Dashboard: record counts plus monthly GCI and sales charts

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{ChartFilter, ChartWindow, DashboardQuery, DashboardResponse};
pub use repositories::{DashboardRepository, MySqlDashboardRepository};
pub use services::DashboardService;
