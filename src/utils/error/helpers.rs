//! Helper functions for creating specific error types

use super::types::SyncError;
use crate::auth::rbac::{ActionKind, PermissionId, RoleId, UserId};

/// Helper functions for creating specific errors
impl SyncError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn load_failed<S: Into<String>>(message: S) -> Self {
        Self::LoadFailed(message.into())
    }

    pub fn busy<S: Into<String>>(message: S) -> Self {
        Self::Busy(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn permission_not_found<S: Into<String>>(resource: S, action: ActionKind) -> Self {
        Self::PermissionNotFound {
            resource: resource.into(),
            action,
        }
    }

    pub fn update_failed<S: Into<String>>(
        role_id: RoleId,
        permission_id: PermissionId,
        granted: bool,
        reason: S,
    ) -> Self {
        Self::UpdateFailed {
            role_id,
            permission_id,
            granted,
            reason: reason.into(),
        }
    }

    pub fn deletion_failed<S: Into<String>>(user_id: UserId, role_id: RoleId, reason: S) -> Self {
        Self::DeletionFailed {
            user_id,
            role_id,
            reason: reason.into(),
        }
    }
}

impl SyncError {
    /// Whether a caller-driven retry of the failed operation makes sense.
    ///
    /// The engine itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::UpdateFailed { .. }
            | Self::DeletionFailed { .. }
            | Self::LoadFailed(_)
            | Self::Busy(_) => true,
            Self::HttpClient(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Api { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            Self::Io(_) => true,
            Self::PermissionNotFound { .. }
            | Self::Config(_)
            | Self::Validation(_)
            | Self::Serialization(_)
            | Self::Yaml(_)
            | Self::Unauthorized(_)
            | Self::Internal(_) => false,
        }
    }
}
