//! Administration backend client

pub mod client;
pub mod types;

pub use client::HttpAccessApi;
pub use types::{CreateRolePermission, ListResponse, PermissionRecord, ProfileResponse};
