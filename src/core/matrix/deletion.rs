//! Two-phase removal of a role from a principal
//!
//! A deletion is first requested, which opens the confirmation gate, and only
//! issued against the backend once confirmed. Deletion is not optimistic: no
//! local state changes until the backend has accepted it.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::session::Liveness;
use crate::auth::rbac::{RoleId, UserId};
use crate::core::traits::AccessApi;
use crate::utils::error::{Result, SyncError};

/// A role held by a principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRoleRef {
    pub user_id: UserId,
    pub role_id: RoleId,
    pub role_name: Option<String>,
}

impl UserRoleRef {
    pub fn new(user_id: UserId, role_id: RoleId) -> Self {
        Self {
            user_id,
            role_id,
            role_name: None,
        }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.role_name = Some(name.into());
        self
    }
}

/// Result of a confirmation that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The backend removed the role; the gate is closed
    Deleted(UserRoleRef),
    /// No deletion was requested
    NothingPending,
    /// A confirmation is already in flight
    InFlight,
    /// The owning view was torn down before the delete completed
    Discarded,
}

#[derive(Debug, Default)]
struct Gate {
    pending: Option<UserRoleRef>,
    in_flight: bool,
}

/// Clears `in_flight` when dropped, including when the confirm future is
/// dropped before the backend answers
struct InFlightGuard {
    gate: Arc<Mutex<Gate>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gate.lock().in_flight = false;
    }
}

/// Confirmation gate holding at most one pending deletion
#[derive(Clone)]
pub struct DeletionController {
    api: Arc<dyn AccessApi>,
    gate: Arc<Mutex<Gate>>,
    liveness: Liveness,
}

impl DeletionController {
    pub fn new(api: Arc<dyn AccessApi>, liveness: Liveness) -> Self {
        Self {
            api,
            gate: Arc::new(Mutex::new(Gate::default())),
            liveness,
        }
    }

    /// Open the gate for `target`, returning any request it replaces
    pub fn request_delete(&self, target: UserRoleRef) -> Option<UserRoleRef> {
        debug!(user_id = %target.user_id, role_id = %target.role_id, "Deletion requested");
        self.gate.lock().pending.replace(target)
    }

    /// Close the gate without side effects
    pub fn cancel_delete(&self) -> Option<UserRoleRef> {
        let cancelled = self.gate.lock().pending.take();
        if let Some(target) = &cancelled {
            debug!(user_id = %target.user_id, role_id = %target.role_id, "Deletion cancelled");
        }
        cancelled
    }

    pub fn pending(&self) -> Option<UserRoleRef> {
        self.gate.lock().pending.clone()
    }

    pub fn is_open(&self) -> bool {
        self.gate.lock().pending.is_some()
    }

    /// Issue the pending deletion
    ///
    /// On success the gate closes and `on_deleted` receives the removed
    /// reference. On failure the gate stays open so the caller can retry.
    pub async fn confirm_delete<F>(&self, on_deleted: F) -> Result<DeleteOutcome>
    where
        F: FnOnce(&UserRoleRef) + Send,
    {
        let (target, in_flight) = {
            let mut gate = self.gate.lock();
            if gate.in_flight {
                return Ok(DeleteOutcome::InFlight);
            }
            let Some(target) = gate.pending.clone() else {
                return Ok(DeleteOutcome::NothingPending);
            };
            gate.in_flight = true;
            let in_flight = InFlightGuard {
                gate: Arc::clone(&self.gate),
            };
            (target, in_flight)
        };

        let result = self
            .api
            .delete_user_role(target.user_id, target.role_id)
            .await;
        drop(in_flight);

        {
            let mut gate = self.gate.lock();
            if result.is_ok() && gate.pending.as_ref() == Some(&target) {
                gate.pending = None;
            }
        }

        if !self.liveness.is_alive() {
            warn!(
                user_id = %target.user_id,
                role_id = %target.role_id,
                "View torn down before deletion completed, discarding result"
            );
            return Ok(DeleteOutcome::Discarded);
        }

        match result {
            Ok(()) => {
                info!(user_id = %target.user_id, role_id = %target.role_id, "Role removed from user");
                on_deleted(&target);
                Ok(DeleteOutcome::Deleted(target))
            }
            Err(e) => {
                warn!(
                    user_id = %target.user_id,
                    role_id = %target.role_id,
                    error = %e,
                    "Role removal failed"
                );
                Err(SyncError::deletion_failed(
                    target.user_id,
                    target.role_id,
                    e.to_string(),
                ))
            }
        }
    }
}

impl std::fmt::Debug for DeletionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeletionController")
            .field("gate", &*self.gate.lock())
            .finish()
    }
}
