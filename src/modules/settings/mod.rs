// Site-wide settings: app name, chart colors, inactivity timeout

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{AppSettings, ChartColors};
pub use repositories::SettingsRepository;
