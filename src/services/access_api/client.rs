//! HTTP implementation of [`AccessApi`]

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use super::types::{CreateRolePermission, ListResponse, PermissionRecord, ProfileResponse};
use crate::auth::credentials::{CredentialStore, StaticCredentials};
use crate::auth::rbac::{Assignment, Permission, PermissionId, Role, RoleId, UserId};
use crate::auth::types::SessionUser;
use crate::config::ApiConfig;
use crate::core::traits::AccessApi;
use crate::utils::error::{Result, SyncError};
use crate::utils::net::{ClientUtils, HttpClientConfig};

/// Administration backend reached over HTTP with bearer authentication
pub struct HttpAccessApi {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpAccessApi {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let base_url = base_url.into();
        ClientUtils::validate_url(&base_url)?;
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Build a client from configuration, using the configured token
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let credentials = Arc::new(StaticCredentials::from_option(config.token.clone()));
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let client = ClientUtils::create_http_client(&HttpClientConfig::from(config))?;
        Self::new(client, config.base_url.clone(), credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = ClientUtils::add_path_to_api_base(&self.base_url, path);
        debug!(%method, %url, "Backend request");

        let builder = self.client.request(method, url);
        match self.credentials.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(SyncError::from_status(status, &body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let list: ListResponse<T> = self.get_json(path).await?;
        Ok(list.into_items())
    }
}

#[async_trait]
impl AccessApi for HttpAccessApi {
    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.get_list("roles").await
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>> {
        let records: Vec<PermissionRecord> = self.get_list("permissions").await?;
        Ok(records
            .into_iter()
            .filter_map(PermissionRecord::into_permission)
            .collect())
    }

    async fn list_role_permissions(&self) -> Result<Vec<Assignment>> {
        self.get_list("role-permissions").await
    }

    async fn create_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> Result<()> {
        let body = CreateRolePermission {
            role_id,
            permission_id,
        };
        self.send(self.request(Method::POST, "role-permissions").json(&body))
            .await?;
        Ok(())
    }

    async fn delete_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> Result<()> {
        let path = format!("role-permissions/{}/{}", role_id, permission_id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn delete_user_role(&self, user_id: UserId, role_id: RoleId) -> Result<()> {
        let path = format!("userrole/{}/roles/{}", user_id, role_id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn fetch_profile(&self) -> Result<SessionUser> {
        if self.credentials.bearer_token().is_none() {
            return Err(SyncError::unauthorized("No session token"));
        }
        let profile: ProfileResponse = self.get_json("user").await?;
        Ok(profile.into_user())
    }
}

impl std::fmt::Debug for HttpAccessApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAccessApi")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}
