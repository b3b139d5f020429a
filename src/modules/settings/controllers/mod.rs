mod settings_controller;

pub use settings_controller::{configure, SettingsResponse};
