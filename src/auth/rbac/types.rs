//! RBAC type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Role identifier assigned by the backend
    RoleId
);
id_type!(
    /// Permission identifier assigned by the backend
    PermissionId
);
id_type!(
    /// Principal (user) identifier assigned by the backend
    UserId
);

/// Role definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role id
    pub id: RoleId,
    /// Role display name
    pub name: String,
}

impl Role {
    pub fn new<S: Into<String>>(id: impl Into<RoleId>, name: S) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The four CRUD actions a permission can grant on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Create,
    Read,
    Update,
    Delete,
}

impl ActionKind {
    /// All actions in display order
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Create,
        ActionKind::Read,
        ActionKind::Update,
        ActionKind::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Create => "create",
            ActionKind::Read => "read",
            ActionKind::Update => "update",
            ActionKind::Delete => "delete",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(ActionKind::Create),
            "read" => Ok(ActionKind::Read),
            "update" => Ok(ActionKind::Update),
            "delete" => Ok(ActionKind::Delete),
            other => Err(format!("Unknown action: {}", other)),
        }
    }
}

/// Permission definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Permission id
    pub id: PermissionId,
    /// Resource this permission applies to
    pub resource: String,
    /// Action this permission allows
    pub action: ActionKind,
    /// Permission display name
    pub name: String,
}

impl Permission {
    pub fn new<R: Into<String>, N: Into<String>>(
        id: impl Into<PermissionId>,
        resource: R,
        action: ActionKind,
        name: N,
    ) -> Self {
        Self {
            id: id.into(),
            resource: resource.into(),
            action,
            name: name.into(),
        }
    }

    /// The derived `resource.action` key, unique across a catalog
    pub fn key(&self) -> String {
        format!("{}.{}", self.resource, self.action)
    }
}

/// One edge of the role/permission relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub role_id: RoleId,
    pub permission_id: PermissionId,
}

impl Assignment {
    pub fn new(role_id: RoleId, permission_id: PermissionId) -> Self {
        Self {
            role_id,
            permission_id,
        }
    }
}

/// Immutable copy of the assignment relation
///
/// Returned by [`RelationStore::snapshot`](super::RelationStore::snapshot); later
/// store mutations are never visible through it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentSet(BTreeSet<Assignment>);

impl AssignmentSet {
    pub fn contains(&self, role_id: RoleId, permission_id: PermissionId) -> bool {
        self.0.contains(&Assignment::new(role_id, permission_id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.0.iter()
    }
}

impl FromIterator<Assignment> for AssignmentSet {
    fn from_iter<I: IntoIterator<Item = Assignment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One toggle in the matrix: a (role, resource, action) triple
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub role_id: RoleId,
    pub resource: String,
    pub action: ActionKind,
}

impl CellKey {
    pub fn new<S: Into<String>>(role_id: RoleId, resource: S, action: ActionKind) -> Self {
        Self {
            role_id,
            resource: resource.into(),
            action,
        }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.role_id, self.resource, self.action)
    }
}
