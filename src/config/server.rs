use crate::config::env_or;
use crate::core::{AppError, Result};
use std::env;

/// Where the HTTP server listens and how many workers it starts
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            workers: default_workers(),
        }
    }

    /// Reads SERVER_HOST, SERVER_PORT and SERVER_WORKERS
    pub fn from_env() -> Result<Self> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env_or("SERVER_PORT", 8080)?;

        let mut config = Self::new(host, port);
        if let Ok(raw) = env::var("SERVER_WORKERS") {
            config.workers = parse_workers(&raw)?;
        }
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_workers() -> usize {
    num_cpus::get() * 2
}

fn parse_workers(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(AppError::Configuration(format!(
            "SERVER_WORKERS must be a positive integer, got {:?}",
            raw
        ))),
        Ok(workers) => Ok(workers),
    }
}
