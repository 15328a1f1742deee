//! Optimistic cell synchronization
//!
//! Each cell moves `Idle -> Locked -> (Committed | RolledBack) -> Idle`.
//! The store is updated before the remote write is issued; on failure the
//! exact pre-toggle membership of that cell is restored.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::lock::{PendingLock, PendingLocks};
use super::session::{Liveness, SharedStore};
use crate::auth::rbac::{ActionKind, CellKey, PermissionId, RoleId};
use crate::core::traits::AccessApi;
use crate::utils::error::{Result, SyncError};

/// Result of a toggle that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The remote write succeeded; `granted` is the new membership
    Committed { granted: bool },
    /// A write for this cell is already in flight; nothing was done
    InFlight,
    /// The cell already had the requested membership; nothing was done
    Unchanged,
    /// The owning view was torn down before the write completed
    Discarded,
}

/// Outcome for one action of a row update
#[derive(Debug)]
pub struct CellResult {
    pub action: ActionKind,
    pub outcome: Result<ToggleOutcome>,
}

/// Drives optimistic toggles of matrix cells against the backend
#[derive(Clone)]
pub struct CellSyncController {
    api: Arc<dyn AccessApi>,
    store: SharedStore,
    locks: PendingLocks,
    liveness: Liveness,
}

impl CellSyncController {
    pub fn new(api: Arc<dyn AccessApi>, store: SharedStore, liveness: Liveness) -> Self {
        Self {
            api,
            store,
            locks: PendingLocks::new(),
            liveness,
        }
    }

    /// Cells with a write in flight
    pub fn pending_locks(&self) -> &PendingLocks {
        &self.locks
    }

    /// Flip the membership of `(role, resource.action)`
    pub async fn toggle(
        &self,
        role_id: RoleId,
        resource: &str,
        action: ActionKind,
    ) -> Result<ToggleOutcome> {
        self.apply(role_id, resource, action, None).await
    }

    /// Bring every action of `resource` for `role_id` to `granted`
    ///
    /// Cells already in the requested state issue no write. The remaining
    /// writes run concurrently, each under its own cell lock.
    pub async fn set_resource(
        &self,
        role_id: RoleId,
        resource: &str,
        granted: bool,
    ) -> Vec<CellResult> {
        let actions: Vec<ActionKind> = {
            let store = self.store.read();
            ActionKind::ALL
                .into_iter()
                .filter(|action| store.permission_for(resource, *action).is_some())
                .collect()
        };

        let writes = actions.into_iter().map(move |action| async move {
            CellResult {
                action,
                outcome: self.apply(role_id, resource, action, Some(granted)).await,
            }
        });

        join_all(writes).await
    }

    async fn apply(
        &self,
        role_id: RoleId,
        resource: &str,
        action: ActionKind,
        target: Option<bool>,
    ) -> Result<ToggleOutcome> {
        let permission_id = {
            let store = self.store.read();
            if !store.has_role(role_id) {
                return Err(SyncError::validation(format!("Unknown role {}", role_id)));
            }
            store
                .permission_for(resource, action)
                .map(|p| p.id)
                .ok_or_else(|| SyncError::permission_not_found(resource, action))?
        };

        let cell = CellKey::new(role_id, resource, action);
        let Some(lock) = self.locks.try_acquire(cell) else {
            debug!(
                role_id = %role_id,
                resource,
                action = %action,
                "Write already in flight, ignoring toggle"
            );
            return Ok(ToggleOutcome::InFlight);
        };

        let had = {
            let mut store = self.store.write();
            let had = store.has_assignment(role_id, permission_id);
            let want = target.unwrap_or(!had);
            if want == had {
                return Ok(ToggleOutcome::Unchanged);
            }
            store.set_assignment(role_id, permission_id, want);
            had
        };

        self.commit(lock, role_id, permission_id, had).await
    }

    /// Issue the remote write for an optimistically applied cell
    async fn commit(
        &self,
        lock: PendingLock,
        role_id: RoleId,
        permission_id: PermissionId,
        had: bool,
    ) -> Result<ToggleOutcome> {
        let want = !had;
        let result = if want {
            self.api
                .create_role_permission(role_id, permission_id)
                .await
        } else {
            self.api
                .delete_role_permission(role_id, permission_id)
                .await
        };

        if !self.liveness.is_alive() {
            warn!(
                cell = %lock.key(),
                "View torn down before write completed, discarding result"
            );
            return Ok(ToggleOutcome::Discarded);
        }

        match result {
            Ok(()) => {
                info!(
                    cell = %lock.key(),
                    permission_id = %permission_id,
                    granted = want,
                    elapsed_ms = lock.elapsed().as_millis() as u64,
                    "Cell committed"
                );
                Ok(ToggleOutcome::Committed { granted: want })
            }
            Err(e) => {
                self.store
                    .write()
                    .set_assignment(role_id, permission_id, had);
                warn!(
                    cell = %lock.key(),
                    permission_id = %permission_id,
                    restored = had,
                    error = %e,
                    "Cell write failed, rolled back"
                );
                Err(SyncError::update_failed(
                    role_id,
                    permission_id,
                    want,
                    e.to_string(),
                ))
            }
        }
    }
}

impl std::fmt::Debug for CellSyncController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellSyncController")
            .field("pending", &self.locks.len())
            .field("alive", &self.liveness.is_alive())
            .finish()
    }
}
