//! Environment overrides
//!
//! Variables are read through a lookup function so callers decide where they
//! come from (the process environment, a `.env` file already loaded by
//! `dotenvy`, or a fixed map in tests).

use super::Config;
use crate::utils::error::{Result, SyncError};
use tracing::debug;

/// Prefix shared by every recognised variable
pub const ENV_PREFIX: &str = "ACCESS_SYNC_";

impl Config {
    /// Apply `ACCESS_SYNC_*` overrides found through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(url) = var("API_URL") {
            self.api.base_url = url;
        }
        if let Some(token) = var("TOKEN") {
            self.api.token = Some(token);
        }
        if let Some(timeout) = var("TIMEOUT_SECS") {
            self.api.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|e| SyncError::config(format!("Invalid timeout: {}", e)))?;
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = var("LOG_JSON") {
            self.logging.json = json
                .trim()
                .parse()
                .map_err(|e| SyncError::config(format!("Invalid log json flag: {}", e)))?;
        }

        debug!("Environment overrides applied");
        Ok(())
    }
}
