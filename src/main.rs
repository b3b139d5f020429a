use actix_cors::Cors;
use actix_web::{http::header, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use realtydesk::config::{Config, SecurityConfig};
use realtydesk::middleware::{ApiKeyAuth, MetricsMiddleware, RateLimiter, RequestId};
use realtydesk::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config);

    config.validate().context("Configuration validation failed")?;
    let timezone = config.app.timezone()?;

    tracing::info!(
        app = %config.app.name,
        env = %config.app.env,
        timezone = %config.app.timezone_name,
        "Starting RealtyDesk CRM"
    );

    let pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        pool_size = config.database.pool_size,
        max_connections = config.database.max_connections,
        "Database pool initialized"
    );

    let state = AppState::new(pool.clone(), timezone);
    let rate_limiter = RateLimiter::new(config.security.rate_limit_per_minute);
    let security = config.security.clone();
    let bind_address = config.server.bind_address();

    let server = HttpServer::new(move || {
        // Registration order is inside-out: the request id is assigned first.
        App::new()
            .configure(|cfg| state.configure(cfg))
            .wrap(ApiKeyAuth::new(state.pool.clone()))
            .wrap(rate_limiter.clone())
            .wrap(MetricsMiddleware::new(state.metrics.clone()))
            .wrap(cors(&security))
            .wrap(TracingLogger::default())
            .wrap(RequestId)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!(address = %bind_address, workers = config.server.workers, "Server started");

    server.await?;
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("realtydesk={},actix_web=info", config.app.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.app.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors(security: &SecurityConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-api-key"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(3600);

    match &security.cors_allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}
