// Health, readiness and metrics endpoints

pub mod controllers;

pub use controllers::configure;
