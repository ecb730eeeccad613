// Environment-driven configuration

pub mod app;
pub mod database;
pub mod rest;

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

pub use app::{AppConfig, HistoryBackend};
pub use database::{run_migrations, DatabaseConfig};
pub use rest::RestStoreConfig;

/// Value of `name`, or `default` when unset. A set value that fails to parse is an error.
pub(crate) fn env_or<T>(name: &str, default: T, expected: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} must be {}, got '{}'", name, expected, raw)),
        Err(_) => Ok(default),
    }
}
