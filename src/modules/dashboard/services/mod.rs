pub mod aggregator;
pub mod dashboard_service;
pub mod presenter;
pub mod window_resolver;

pub use aggregator::aggregate;
pub use dashboard_service::DashboardService;
pub use presenter::{month_labels, present_income, present_sales};
pub use window_resolver::resolve_window;
