use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

use super::env_or;

/// Hosted tabular history service (PostgREST-compatible)
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    pub base_url: String,
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl RestStoreConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("HISTORY_REST_URL")
            .context("HISTORY_REST_URL is required for the rest history backend")?;
        let api_key = env::var("HISTORY_REST_KEY")
            .context("HISTORY_REST_KEY is required for the rest history backend")?;
        let table = env::var("HISTORY_REST_TABLE").unwrap_or_else(|_| "workouts".to_string());
        let timeout_secs: u64 = env_or("HISTORY_REST_TIMEOUT", 30, "a number of seconds")?;
        if timeout_secs == 0 {
            bail!("HISTORY_REST_TIMEOUT must be at least 1 second");
        }

        Ok(Self {
            base_url,
            api_key,
            table,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
