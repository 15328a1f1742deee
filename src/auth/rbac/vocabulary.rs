//! Pattern tables used by the privilege classifier

use crate::config::ClassifierConfig;
use crate::utils::error::{Result, SyncError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Built-in administrator vocabulary
pub const ADMINISTRATOR_TERMS: &[&str] = &["admin", "administrateur", "owner", "super"];

/// Built-in moderation vocabulary
pub const MODERATION_TERMS: &[&str] = &[
    "moderateur",
    "modérateur",
    "moderator",
    "moderate",
    "approver",
    "approve",
    "manage",
    "manager",
    "gerer",
    "gérer",
];

/// Built-in deletion vocabulary
pub const DELETION_TERMS: &[&str] = &["supprimer", "delete", "remove"];

/// Resource whose permissions grant moderation rights
pub const DEFAULT_MODERATED_RESOURCE: &str = "comments";

static DEFAULT_VOCABULARY: Lazy<Vocabulary> = Lazy::new(|| {
    Vocabulary::from_terms(
        ADMINISTRATOR_TERMS,
        MODERATION_TERMS,
        DELETION_TERMS,
        DEFAULT_MODERATED_RESOURCE,
    )
    .expect("Invalid built-in vocabulary")
});

/// Case-insensitive substring patterns for each privilege family
#[derive(Debug, Clone)]
pub struct Vocabulary {
    administrator: Regex,
    moderation: Regex,
    deletion: Regex,
    moderated_resource: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        DEFAULT_VOCABULARY.clone()
    }
}

impl Vocabulary {
    /// Compile a vocabulary from literal terms
    pub fn from_terms<S: AsRef<str>>(
        administrator: &[S],
        moderation: &[S],
        deletion: &[S],
        moderated_resource: &str,
    ) -> Result<Self> {
        Ok(Self {
            administrator: compile("administrator", administrator)?,
            moderation: compile("moderation", moderation)?,
            deletion: compile("deletion", deletion)?,
            moderated_resource: moderated_resource.trim().to_string(),
        })
    }

    /// Built-in tables extended with the configured terms
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        let extend = |builtin: &[&str], extra: &[String]| -> Vec<String> {
            builtin
                .iter()
                .map(|t| t.to_string())
                .chain(extra.iter().cloned())
                .collect()
        };

        Self::from_terms(
            &extend(ADMINISTRATOR_TERMS, &config.admin_terms),
            &extend(MODERATION_TERMS, &config.moderation_terms),
            &extend(DELETION_TERMS, &config.deletion_terms),
            &config.moderated_resource,
        )
    }

    pub fn is_administrator(&self, name: &str) -> bool {
        self.administrator.is_match(name)
    }

    pub fn is_moderation(&self, name: &str) -> bool {
        self.moderation.is_match(name)
    }

    pub fn is_deletion(&self, name: &str) -> bool {
        self.deletion.is_match(name)
    }

    /// Whether `resource` is the moderated resource (trimmed, ASCII case-insensitive)
    pub fn is_moderated_resource(&self, resource: &str) -> bool {
        resource.trim().eq_ignore_ascii_case(&self.moderated_resource)
    }

    pub fn moderated_resource(&self) -> &str {
        &self.moderated_resource
    }
}

fn compile<S: AsRef<str>>(family: &str, terms: &[S]) -> Result<Regex> {
    let alternatives: Vec<String> = terms
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect();

    if alternatives.is_empty() {
        return Err(SyncError::validation(format!(
            "The {} vocabulary must contain at least one term",
            family
        )));
    }

    Regex::new(&format!("(?i)(?:{})", alternatives.join("|"))).map_err(|e| {
        SyncError::config(format!("Invalid {} vocabulary: {}", family, e))
    })
}
