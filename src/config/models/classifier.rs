//! Privilege classifier configuration

use crate::auth::rbac::DEFAULT_MODERATED_RESOURCE;
use serde::{Deserialize, Serialize};

/// Extra vocabulary appended to the built-in classifier tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Additional administrator terms
    #[serde(default)]
    pub admin_terms: Vec<String>,
    /// Additional moderation terms
    #[serde(default)]
    pub moderation_terms: Vec<String>,
    /// Additional deletion terms
    #[serde(default)]
    pub deletion_terms: Vec<String>,
    /// Resource whose permissions confer moderation rights
    #[serde(default = "default_moderated_resource")]
    pub moderated_resource: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            admin_terms: Vec::new(),
            moderation_terms: Vec::new(),
            deletion_terms: Vec::new(),
            moderated_resource: default_moderated_resource(),
        }
    }
}

fn default_moderated_resource() -> String {
    DEFAULT_MODERATED_RESOURCE.to_string()
}
