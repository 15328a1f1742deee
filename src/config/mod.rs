//! Configuration management
//!
//! This module handles loading, validation, and management of all engine configuration.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::ENV_PREFIX;
pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Classifier vocabulary configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Permission matrix configuration
    #[serde(default)]
    pub matrix: MatrixConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SyncError::config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml_str(&content)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document without validating it
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content)
            .map_err(|e| SyncError::config(format!("Failed to parse config: {}", e)))
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.api
            .validate()
            .map_err(|e| SyncError::config(format!("API config error: {}", e)))?;
        self.classifier
            .validate()
            .map_err(|e| SyncError::config(format!("Classifier config error: {}", e)))?;
        self.matrix
            .validate()
            .map_err(|e| SyncError::config(format!("Matrix config error: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| SyncError::config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SyncError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
