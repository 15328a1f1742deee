//! Display-oriented derivations over the relation store
//!
//! Nothing here mutates or caches: every call recomputes from the store it
//! borrows, so the view always reflects the latest state regardless of the
//! order in which writes completed.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::auth::rbac::{ActionKind, CellKey, PermissionId, RelationStore, Role, RoleId};
use crate::config::MatrixConfig;

/// Granted actions out of the actions considered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub granted: usize,
    pub total: usize,
}

impl Coverage {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.granted as f64 / self.total as f64
        }
    }

    pub fn is_full(&self) -> bool {
        self.total > 0 && self.granted == self.total
    }

    pub fn is_empty(&self) -> bool {
        self.granted == 0
    }
}

impl std::ops::Add for Coverage {
    type Output = Coverage;

    fn add(self, other: Coverage) -> Coverage {
        Coverage {
            granted: self.granted + other.granted,
            total: self.total + other.total,
        }
    }
}

/// State of one matrix cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellState {
    pub action: ActionKind,
    pub permission_id: Option<PermissionId>,
    pub granted: bool,
    pub pending: bool,
}

impl CellState {
    /// Whether a permission exists for this cell
    pub fn available(&self) -> bool {
        self.permission_id.is_some()
    }

    /// Whether the cell accepts a toggle right now
    pub fn editable(&self) -> bool {
        self.available() && !self.pending
    }
}

/// One role's cells within a resource row
#[derive(Debug, Clone, Serialize)]
pub struct RoleCells {
    pub role_id: RoleId,
    pub role_name: String,
    pub coverage: Coverage,
    pub cells: Vec<CellState>,
}

/// One resource row of the matrix
#[derive(Debug, Clone, Serialize)]
pub struct ResourceRow {
    pub resource: String,
    pub label: String,
    pub expanded: bool,
    pub roles: Vec<RoleCells>,
}

/// Search, role selection and row expansion chosen by the user
#[derive(Debug, Clone, Default)]
pub struct MatrixViewState {
    pub search: String,
    pub selected_roles: BTreeSet<RoleId>,
    pub expanded: BTreeSet<String>,
}

impl MatrixViewState {
    pub fn set_search<S: Into<String>>(&mut self, search: S) {
        self.search = search.into();
    }

    /// Add or remove a role from the selection
    pub fn toggle_role(&mut self, role_id: RoleId) {
        if !self.selected_roles.remove(&role_id) {
            self.selected_roles.insert(role_id);
        }
    }

    /// Back to select-all
    pub fn clear_selection(&mut self) {
        self.selected_roles.clear();
    }

    pub fn toggle_expanded(&mut self, resource: &str) {
        if !self.expanded.remove(resource) {
            self.expanded.insert(resource.to_string());
        }
    }

    pub fn expand_all<'a>(&mut self, resources: impl IntoIterator<Item = &'a str>) {
        self.expanded
            .extend(resources.into_iter().map(str::to_string));
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn is_expanded(&self, resource: &str) -> bool {
        self.expanded.contains(resource)
    }
}

/// Read-only projection of a [`RelationStore`]
pub struct MatrixView<'a> {
    store: &'a RelationStore,
    config: &'a MatrixConfig,
}

impl<'a> MatrixView<'a> {
    pub fn new(store: &'a RelationStore, config: &'a MatrixConfig) -> Self {
        Self { store, config }
    }

    /// Assigned actions of `resource` for `role_id`, out of the four actions
    pub fn coverage(&self, role_id: RoleId, resource: &str) -> Coverage {
        let granted = ActionKind::ALL
            .iter()
            .filter_map(|action| self.store.permission_for(resource, *action))
            .filter(|permission| self.store.has_assignment(role_id, permission.id))
            .count();

        Coverage {
            granted,
            total: ActionKind::ALL.len(),
        }
    }

    /// Coverage of `role_id` summed over every resource
    pub fn role_totals(&self, role_id: RoleId) -> Coverage {
        self.store
            .resources()
            .into_iter()
            .map(|resource| self.coverage(role_id, resource))
            .fold(Coverage::default(), |acc, c| acc + c)
    }

    /// Coverage of `resource` summed over the displayed roles
    pub fn resource_totals(&self, resource: &str, selected: &BTreeSet<RoleId>) -> Coverage {
        self.displayed_roles(selected)
            .into_iter()
            .map(|role| self.coverage(role.id, resource))
            .fold(Coverage::default(), |acc, c| acc + c)
    }

    /// Resources whose identifier or label contains `search`, case-insensitively
    ///
    /// A blank term returns every resource. Catalog order is preserved.
    pub fn filtered_resources(&self, search: &str) -> Vec<String> {
        let needle = search.trim().to_lowercase();

        self.store
            .resources()
            .into_iter()
            .filter(|resource| {
                needle.is_empty()
                    || resource.to_lowercase().contains(&needle)
                    || self
                        .config
                        .label_for(resource)
                        .to_lowercase()
                        .contains(&needle)
            })
            .map(str::to_string)
            .collect()
    }

    /// All roles when the selection is empty, otherwise the selected ones
    pub fn displayed_roles(&self, selected: &BTreeSet<RoleId>) -> Vec<&'a Role> {
        self.store
            .roles()
            .iter()
            .filter(|role| selected.is_empty() || selected.contains(&role.id))
            .collect()
    }

    /// Cell states of `role_id` for every action of `resource`
    pub fn cells(
        &self,
        role_id: RoleId,
        resource: &str,
        pending: &HashSet<CellKey>,
    ) -> Vec<CellState> {
        ActionKind::ALL
            .iter()
            .map(|&action| {
                let permission_id = self.store.permission_for(resource, action).map(|p| p.id);
                CellState {
                    action,
                    permission_id,
                    granted: permission_id
                        .is_some_and(|id| self.store.has_assignment(role_id, id)),
                    pending: pending.contains(&CellKey::new(role_id, resource, action)),
                }
            })
            .collect()
    }

    /// Rows for the filtered resources and displayed roles
    pub fn rows(&self, state: &MatrixViewState, pending: &HashSet<CellKey>) -> Vec<ResourceRow> {
        let roles = self.displayed_roles(&state.selected_roles);

        self.filtered_resources(&state.search)
            .into_iter()
            .map(|resource| {
                let roles = roles
                    .iter()
                    .map(|role| RoleCells {
                        role_id: role.id,
                        role_name: role.name.clone(),
                        coverage: self.coverage(role.id, &resource),
                        cells: self.cells(role.id, &resource, pending),
                    })
                    .collect();

                ResourceRow {
                    label: self.config.label_for(&resource).to_string(),
                    expanded: state.is_expanded(&resource),
                    resource,
                    roles,
                }
            })
            .collect()
    }
}
