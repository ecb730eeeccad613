use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;

use crate::services::calorie_service::CalorieSource;

/// Number of prior sessions fed to the prescription engine
pub const DEFAULT_HISTORY_LIMIT: usize = 28;
/// Upper bound accepted for `HISTORY_LIMIT`
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// Which history store the service persists workouts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryBackend {
    Postgres,
    Rest,
    Memory,
}

impl FromStr for HistoryBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(HistoryBackend::Postgres),
            "rest" => Ok(HistoryBackend::Rest),
            "memory" => Ok(HistoryBackend::Memory),
            other => Err(anyhow!(
                "Invalid history backend '{}'. Must be one of: postgres, rest, memory",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub calorie_source: CalorieSource,
    pub history_backend: HistoryBackend,
    pub history_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let calorie_source = env::var("CALORIE_SOURCE")
            .unwrap_or_else(|_| "server_derived".to_string())
            .parse::<CalorieSource>()
            .map_err(|e| anyhow!(e))?;
        let history_backend = env::var("HISTORY_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .parse::<HistoryBackend>()?;
        let history_limit = env::var("HISTORY_LIMIT")
            .unwrap_or_else(|_| DEFAULT_HISTORY_LIMIT.to_string())
            .parse::<usize>()
            .context("HISTORY_LIMIT must be a positive integer")?;
        if !(1..=MAX_HISTORY_LIMIT).contains(&history_limit) {
            return Err(anyhow!(
                "HISTORY_LIMIT must be between 1 and {}, got {}",
                MAX_HISTORY_LIMIT,
                history_limit
            ));
        }

        Ok(AppConfig {
            host,
            port,
            environment,
            log_level,
            calorie_source,
            history_backend,
            history_limit,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
