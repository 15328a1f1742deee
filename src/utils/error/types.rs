//! Error types for the synchronization engine

use crate::auth::rbac::{ActionKind, PermissionId, RoleId, UserId};
use thiserror::Error;

/// Result type alias for the synchronization engine
pub type Result<T> = std::result::Result<T, SyncError>;

/// Main error type for the synchronization engine
#[derive(Error, Debug)]
pub enum SyncError {
    /// The requested `resource.action` has no catalog entry
    #[error("No permission is defined for {resource}.{action}")]
    PermissionNotFound { resource: String, action: ActionKind },

    /// A remote write failed after the optimistic change was applied and reverted
    #[error(
        "Could not {} permission {permission_id} for role {role_id}: {reason}",
        write_verb(.granted)
    )]
    UpdateFailed {
        role_id: RoleId,
        permission_id: PermissionId,
        granted: bool,
        reason: String,
    },

    /// A remote role-principal deletion failed
    #[error("Could not remove role {role_id} from user {user_id}: {reason}")]
    DeletionFailed {
        user_id: UserId,
        role_id: RoleId,
        reason: String,
    },

    /// The bulk catalog fetch failed
    #[error("Failed to load access-control data: {0}")]
    LoadFailed(String),

    /// The operation cannot run while other writes are in flight
    #[error("Busy: {0}")]
    Busy(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Non-2xx response from the backend
    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Missing or rejected credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

fn write_verb(granted: &bool) -> &'static str {
    if *granted { "grant" } else { "revoke" }
}
