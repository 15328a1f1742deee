//! Validators for each configuration section

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;
use url::Url;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Validate for ApiConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating API configuration");

        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base URL '{}': {}", self.base_url, e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.timeout_secs > 300 {
            return Err("Timeout should not exceed 300 seconds".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("User agent cannot be empty".to_string());
        }

        if let Some(proxy) = &self.proxy {
            Url::parse(proxy).map_err(|e| format!("Invalid proxy URL '{}': {}", proxy, e))?;
        }

        if let Some(token) = &self.token {
            if token.trim().is_empty() {
                return Err("Token cannot be blank; omit it for anonymous access".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for ClassifierConfig {
    fn validate(&self) -> Result<(), String> {
        let terms = self
            .admin_terms
            .iter()
            .chain(&self.moderation_terms)
            .chain(&self.deletion_terms);

        for term in terms {
            if term.trim().is_empty() {
                return Err("Vocabulary terms cannot be blank".to_string());
            }
        }

        if self.moderated_resource.trim().is_empty() {
            return Err("Moderated resource cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for MatrixConfig {
    fn validate(&self) -> Result<(), String> {
        for (resource, label) in &self.resource_labels {
            if resource.trim().is_empty() {
                return Err("Resource label keys cannot be empty".to_string());
            }
            if label.trim().is_empty() {
                return Err(format!("Label for resource '{}' cannot be empty", resource));
            }
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let level = self.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(format!(
                "Unknown log level '{}', expected one of {}",
                self.level,
                LOG_LEVELS.join(", ")
            ));
        }

        Ok(())
    }
}
