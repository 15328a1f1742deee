//! Remote boundary of the synchronization engine
//!
//! One trait covers every call the engine issues against the administration
//! backend. Implementations own transport, authentication and status mapping;
//! the engine only distinguishes success from failure.

use async_trait::async_trait;

use crate::auth::rbac::{Assignment, Permission, PermissionId, Role, RoleId, UserId};
use crate::auth::types::SessionUser;
use crate::utils::error::Result;

/// Access-control backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessApi: Send + Sync {
    /// `GET roles`
    async fn list_roles(&self) -> Result<Vec<Role>>;

    /// `GET permissions`
    async fn list_permissions(&self) -> Result<Vec<Permission>>;

    /// `GET role-permissions`
    async fn list_role_permissions(&self) -> Result<Vec<Assignment>>;

    /// `POST role-permissions`
    async fn create_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> Result<()>;

    /// `DELETE role-permissions/{role_id}/{permission_id}`
    async fn delete_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> Result<()>;

    /// `DELETE userrole/{user_id}/roles/{role_id}`
    async fn delete_user_role(&self, user_id: UserId, role_id: RoleId) -> Result<()>;

    /// `GET user` for the authenticated principal
    async fn fetch_profile(&self) -> Result<SessionUser>;
}
