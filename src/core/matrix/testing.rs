//! In-memory backend used by the matrix tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use crate::auth::rbac::{ActionKind, Assignment, Permission, PermissionId, Role, RoleId, UserId};
use crate::auth::types::SessionUser;
use crate::core::traits::AccessApi;
use crate::utils::error::{Result, SyncError};

/// Backend fake with failure injection and optional latency
#[derive(Debug, Default)]
pub struct FakeAccessApi {
    roles: Mutex<Vec<Role>>,
    permissions: Mutex<Vec<Permission>>,
    assignments: Mutex<BTreeSet<Assignment>>,
    user_roles: Mutex<BTreeSet<(UserId, RoleId)>>,
    profile: Mutex<SessionUser>,
    failing_permissions: Mutex<HashSet<PermissionId>>,
    fail_writes: AtomicBool,
    fail_loads: AtomicBool,
    fail_profile: AtomicBool,
    latency: Mutex<Option<Duration>>,
    writes: AtomicUsize,
}

impl FakeAccessApi {
    /// Two roles and the four CRUD permissions on `posts` and `comments`
    pub fn seeded() -> Self {
        let fake = Self::default();
        *fake.roles.lock() = vec![Role::new(1, "Administrateur"), Role::new(2, "Editor")];

        let mut permissions = Vec::new();
        for (base, resource) in [(10, "posts"), (20, "comments")] {
            for (offset, action) in ActionKind::ALL.into_iter().enumerate() {
                permissions.push(Permission::new(
                    base + offset as i64,
                    resource,
                    action,
                    format!("{} {}", action, resource),
                ));
            }
        }
        *fake.permissions.lock() = permissions;
        fake
    }

    pub fn with_assignment(self, role_id: i64, permission_id: i64) -> Self {
        self.assignments
            .lock()
            .insert(Assignment::new(RoleId(role_id), PermissionId(permission_id)));
        self
    }

    pub fn with_user_role(self, user_id: i64, role_id: i64) -> Self {
        self.user_roles
            .lock()
            .insert((UserId(user_id), RoleId(role_id)));
        self
    }

    pub fn with_profile(self, profile: SessionUser) -> Self {
        *self.profile.lock() = profile;
        self
    }

    pub fn with_latency(self, latency: Duration) -> Self {
        *self.latency.lock() = Some(latency);
        self
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_profile(&self, fail: bool) {
        self.fail_profile.store(fail, Ordering::SeqCst);
    }

    pub fn fail_permission(&self, permission_id: i64) {
        self.failing_permissions
            .lock()
            .insert(PermissionId(permission_id));
    }

    pub fn set_permissions(&self, permissions: Vec<Permission>) {
        *self.permissions.lock() = permissions;
    }

    /// Remote writes attempted so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn has_remote_assignment(&self, role_id: i64, permission_id: i64) -> bool {
        self.assignments
            .lock()
            .contains(&Assignment::new(RoleId(role_id), PermissionId(permission_id)))
    }

    pub fn has_user_role(&self, user_id: i64, role_id: i64) -> bool {
        self.user_roles
            .lock()
            .contains(&(UserId(user_id), RoleId(role_id)))
    }

    async fn delay(&self) {
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn check_load(&self) -> Result<()> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(SyncError::Api {
                status: 503,
                message: "backend unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn check_write(&self, permission_id: Option<PermissionId>) -> Result<()> {
        let injected = permission_id.is_some_and(|id| self.failing_permissions.lock().contains(&id));
        if self.fail_writes.load(Ordering::SeqCst) || injected {
            return Err(SyncError::Api {
                status: 500,
                message: "write rejected".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AccessApi for FakeAccessApi {
    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.delay().await;
        self.check_load()?;
        Ok(self.roles.lock().clone())
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>> {
        self.delay().await;
        self.check_load()?;
        Ok(self.permissions.lock().clone())
    }

    async fn list_role_permissions(&self) -> Result<Vec<Assignment>> {
        self.delay().await;
        self.check_load()?;
        Ok(self.assignments.lock().iter().copied().collect())
    }

    async fn create_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        self.check_write(Some(permission_id))?;
        self.assignments
            .lock()
            .insert(Assignment::new(role_id, permission_id));
        Ok(())
    }

    async fn delete_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        self.check_write(Some(permission_id))?;
        self.assignments
            .lock()
            .remove(&Assignment::new(role_id, permission_id));
        Ok(())
    }

    async fn delete_user_role(&self, user_id: UserId, role_id: RoleId) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        self.check_write(None)?;
        self.user_roles.lock().remove(&(user_id, role_id));
        Ok(())
    }

    async fn fetch_profile(&self) -> Result<SessionUser> {
        self.delay().await;
        if self.fail_profile.load(Ordering::SeqCst) {
            return Err(SyncError::unauthorized("401: token expired"));
        }
        Ok(self.profile.lock().clone())
    }
}
