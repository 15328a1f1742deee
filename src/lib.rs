//! # access-sync
//!
//! Client-side access-control synchronization engine.
//!
//! ## Features
//!
//! - **Privilege classification**: decides whether a principal is an
//!   administrator, a moderator, or may delete any content, from the names of
//!   the roles and permissions it holds
//! - **Permission matrix**: an in-memory role/permission relation edited
//!   through optimistic per-cell toggles with exact rollback on failure
//! - **In-flight locking**: one remote write per cell at a time
//! - **Two-phase role removal**: request, then confirm, one deletion at a time
//! - **Teardown safety**: completions arriving after the view is gone are
//!   discarded
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use access_sync::{ActionKind, Config, HttpAccessApi, MatrixSession, RoleId};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let api = Arc::new(HttpAccessApi::from_config(&config.api)?);
//!
//!     let session = MatrixSession::load(api, config.matrix.clone()).await?;
//!     session
//!         .cells()
//!         .toggle(RoleId(2), "posts", ActionKind::Create)
//!         .await?;
//!
//!     let coverage = session.with_view(|view| view.coverage(RoleId(2), "posts"));
//!     println!("{}/{}", coverage.granted, coverage.total);
//!
//!     session.teardown();
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{Result, SyncError};

pub use auth::rbac::{
    ActionKind, Assignment, CellKey, Permission, PermissionId, PrivilegeClassifier,
    PrivilegeVerdict, RelationStore, Role, RoleId, UserId, Vocabulary, classify,
};
pub use auth::{
    ClaimedPermission, ClaimedRole, CredentialStore, EnvCredentials, Principal,
    PrincipalResolver, SessionContext, SessionUser, StaticCredentials,
};
pub use core::matrix::{
    CellSyncController, Coverage, DeleteOutcome, DeletionController, Liveness, MatrixSession,
    MatrixView, MatrixViewState, ToggleOutcome, UserRoleRef,
};
pub use core::traits::AccessApi;
pub use services::HttpAccessApi;

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp, seconds since the epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
