//! Permission matrix configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Permission matrix configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Localized label per resource identifier
    #[serde(default)]
    pub resource_labels: HashMap<String, String>,
}

impl MatrixConfig {
    /// Label for a resource, falling back to the identifier
    pub fn label_for<'a>(&'a self, resource: &'a str) -> &'a str {
        self.resource_labels
            .get(resource)
            .map(String::as_str)
            .unwrap_or(resource)
    }
}
