//! In-memory role/permission relation

use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use super::types::{ActionKind, Assignment, AssignmentSet, Permission, PermissionId, Role, RoleId};

/// Catalogs of roles and permissions plus the set of assignments between them
///
/// Every assignment references a role and a permission present in the current
/// catalogs. Replacing a catalog prunes the assignments it orphans.
#[derive(Debug, Clone, Default)]
pub struct RelationStore {
    roles: Vec<Role>,
    permissions: Vec<Permission>,
    /// `(resource, action)` -> index into `permissions`
    permission_index: HashMap<(String, ActionKind), usize>,
    assignments: HashSet<Assignment>,
    revision: u64,
}

impl RelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from freshly loaded catalogs
    pub fn from_catalogs(
        roles: Vec<Role>,
        permissions: Vec<Permission>,
        assignments: impl IntoIterator<Item = Assignment>,
    ) -> Self {
        let mut store = Self::new();
        store.replace_catalogs(roles, permissions, assignments);
        store
    }

    /// True iff the pair exists in the assignment set
    pub fn has_assignment(&self, role_id: RoleId, permission_id: PermissionId) -> bool {
        self.assignments
            .contains(&Assignment::new(role_id, permission_id))
    }

    /// Idempotent insert. Returns whether the set changed.
    ///
    /// Pairs referencing an unknown role or permission are refused.
    pub fn add_assignment(&mut self, role_id: RoleId, permission_id: PermissionId) -> bool {
        if !self.has_role(role_id) || !self.has_permission(permission_id) {
            warn!(
                role_id = %role_id,
                permission_id = %permission_id,
                "Refusing assignment that references an unknown role or permission"
            );
            return false;
        }

        let inserted = self
            .assignments
            .insert(Assignment::new(role_id, permission_id));
        if inserted {
            self.revision += 1;
        }
        inserted
    }

    /// Idempotent removal. Returns whether the set changed.
    pub fn remove_assignment(&mut self, role_id: RoleId, permission_id: PermissionId) -> bool {
        let removed = self
            .assignments
            .remove(&Assignment::new(role_id, permission_id));
        if removed {
            self.revision += 1;
        }
        removed
    }

    /// Bring one pair to the requested membership
    pub fn set_assignment(
        &mut self,
        role_id: RoleId,
        permission_id: PermissionId,
        present: bool,
    ) -> bool {
        if present {
            self.add_assignment(role_id, permission_id)
        } else {
            self.remove_assignment(role_id, permission_id)
        }
    }

    /// Immutable copy of the current assignments
    pub fn snapshot(&self) -> AssignmentSet {
        self.assignments.iter().copied().collect()
    }

    /// Replace the role catalog, pruning assignments of removed roles
    pub fn replace_roles(&mut self, roles: Vec<Role>) {
        self.roles = dedup_roles(roles);
        self.prune_orphans();
        self.revision += 1;
    }

    /// Replace the permission catalog, pruning assignments of removed permissions
    pub fn replace_permissions(&mut self, permissions: Vec<Permission>) {
        let (permissions, permission_index) = index_permissions(permissions);
        self.permissions = permissions;
        self.permission_index = permission_index;
        self.prune_orphans();
        self.revision += 1;
    }

    /// Replace both catalogs and the assignment relation in one step
    pub fn replace_catalogs(
        &mut self,
        roles: Vec<Role>,
        permissions: Vec<Permission>,
        assignments: impl IntoIterator<Item = Assignment>,
    ) {
        self.roles = dedup_roles(roles);
        let (permissions, permission_index) = index_permissions(permissions);
        self.permissions = permissions;
        self.permission_index = permission_index;
        self.assignments = assignments.into_iter().collect();
        self.prune_orphans();
        self.revision += 1;
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn role(&self, role_id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == role_id)
    }

    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.roles.iter().any(|r| r.id == role_id)
    }

    pub fn has_permission(&self, permission_id: PermissionId) -> bool {
        self.permissions.iter().any(|p| p.id == permission_id)
    }

    /// Look up the permission for `resource.action`
    pub fn permission_for(&self, resource: &str, action: ActionKind) -> Option<&Permission> {
        self.permission_index
            .get(&(resource.to_string(), action))
            .map(|&idx| &self.permissions[idx])
    }

    /// Distinct resources in catalog order
    pub fn resources(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.permissions
            .iter()
            .map(|p| p.resource.as_str())
            .filter(|r| seen.insert(*r))
            .collect()
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Monotonic counter bumped by every effective mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn prune_orphans(&mut self) {
        let role_ids: HashSet<RoleId> = self.roles.iter().map(|r| r.id).collect();
        let permission_ids: HashSet<PermissionId> =
            self.permissions.iter().map(|p| p.id).collect();

        let before = self.assignments.len();
        self.assignments.retain(|a| {
            role_ids.contains(&a.role_id) && permission_ids.contains(&a.permission_id)
        });

        let pruned = before - self.assignments.len();
        if pruned > 0 {
            debug!(pruned, "Pruned orphaned assignments");
        }
    }
}

fn dedup_roles(roles: Vec<Role>) -> Vec<Role> {
    let mut seen = HashSet::new();
    roles
        .into_iter()
        .filter(|r| {
            let fresh = seen.insert(r.id);
            if !fresh {
                warn!(role_id = %r.id, "Dropping duplicate role");
            }
            fresh
        })
        .collect()
}

/// Keep the first permission per `(resource, action)` and per id
fn index_permissions(
    permissions: Vec<Permission>,
) -> (Vec<Permission>, HashMap<(String, ActionKind), usize>) {
    let mut kept = Vec::with_capacity(permissions.len());
    let mut index = HashMap::new();
    let mut ids = HashSet::new();

    for permission in permissions {
        let key = (permission.resource.clone(), permission.action);
        if index.contains_key(&key) || !ids.insert(permission.id) {
            warn!(
                permission_id = %permission.id,
                key = %permission.key(),
                "Dropping duplicate permission"
            );
            continue;
        }
        index.insert(key, kept.len());
        kept.push(permission);
    }

    (kept, index)
}
