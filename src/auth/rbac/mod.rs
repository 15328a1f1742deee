//! Role-Based Access Control (RBAC) domain
//!
//! Role and permission catalogs, the assignment relation between them and the
//! heuristic privilege classifier.

mod classifier;
mod store;
mod types;
mod vocabulary;

// Re-export public types and structs
pub use classifier::{PrivilegeClassifier, PrivilegeVerdict, classify};
pub use store::RelationStore;
pub use types::{
    ActionKind, Assignment, AssignmentSet, CellKey, Permission, PermissionId, Role, RoleId, UserId,
};
pub use vocabulary::{
    ADMINISTRATOR_TERMS, DEFAULT_MODERATED_RESOURCE, DELETION_TERMS, MODERATION_TERMS, Vocabulary,
};
