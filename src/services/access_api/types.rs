//! Wire shapes of the administration backend

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::auth::rbac::{ActionKind, Permission, PermissionId, RoleId};
use crate::auth::types::SessionUser;

/// A list endpoint body: a bare array or an object with a `data` array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

/// `GET user` body: `{ "user": {...} }` or the user object itself
///
/// A body carrying a `user` key is always read as the wrapped shape, so a
/// malformed wrapped user is an error rather than an empty bare user.
#[derive(Debug)]
pub enum ProfileResponse {
    Wrapped { user: SessionUser },
    Bare(SessionUser),
}

impl<'de> Deserialize<'de> for ProfileResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = Value::deserialize(deserializer)?;

        if let Some(user) = value.as_object_mut().and_then(|body| body.remove("user")) {
            return SessionUser::deserialize(user)
                .map(|user| Self::Wrapped { user })
                .map_err(de::Error::custom);
        }

        SessionUser::deserialize(value)
            .map(Self::Bare)
            .map_err(de::Error::custom)
    }
}

impl ProfileResponse {
    pub fn into_user(self) -> SessionUser {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

/// Permission as sent by the backend, with a free-form action
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionRecord {
    pub id: PermissionId,
    pub resource: String,
    pub action: String,
    #[serde(default)]
    pub name: String,
}

impl PermissionRecord {
    /// Convert to a catalog permission, or `None` for an unknown action
    pub fn into_permission(self) -> Option<Permission> {
        match self.action.parse::<ActionKind>() {
            Ok(action) => Some(Permission::new(self.id, self.resource, action, self.name)),
            Err(e) => {
                warn!(permission_id = %self.id, error = %e, "Skipping permission with unknown action");
                None
            }
        }
    }
}

/// `POST role-permissions` body
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CreateRolePermission {
    pub role_id: RoleId,
    pub permission_id: PermissionId,
}
