//! Principal types as reported by session claims and the profile endpoint
//!
//! Both sources are loosely shaped: every field defaults when absent or null
//! so a malformed record degrades to "no privilege" instead of failing to parse.

use crate::auth::rbac::{PermissionId, RoleId, UserId};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Role as carried by a principal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimedRole {
    pub id: Option<RoleId>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

impl ClaimedRole {
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// Permission as carried by a principal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimedPermission {
    pub id: Option<PermissionId>,
    #[serde(deserialize_with = "null_as_default")]
    pub resource: String,
    pub action: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

impl ClaimedPermission {
    pub fn new<R: Into<String>, N: Into<String>>(resource: R, name: N) -> Self {
        Self {
            id: None,
            resource: resource.into(),
            action: None,
            name: name.into(),
        }
    }
}

/// Session user (claims or `GET user` profile)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionUser {
    pub id: Option<UserId>,
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<ClaimedRole>,
    #[serde(deserialize_with = "null_as_default")]
    pub permissions: Vec<ClaimedPermission>,
}

impl SessionUser {
    pub fn is_anonymous(&self) -> bool {
        self.id.is_none() && self.roles.is_empty() && self.permissions.is_empty()
    }
}

/// A principal merged from every available source
#[derive(Debug, Clone, Default)]
pub struct Principal {
    pub user: SessionUser,
    pub roles: Vec<ClaimedRole>,
    pub permissions: Vec<ClaimedPermission>,
}

impl Principal {
    pub fn anonymous() -> Self {
        Self::default()
    }
}
