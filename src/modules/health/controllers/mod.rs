mod health_controller;
mod metrics;

pub use health_controller::{HealthResponse, ReadinessResponse};

use actix_web::web;

/// `/health` and `/ready` skip authentication; `/metrics` does not
pub fn configure(cfg: &mut web::ServiceConfig) {
    health_controller::configure(cfg);
    metrics::configure(cfg);
}
