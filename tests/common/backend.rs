//! Mock administration backend

use access_sync::HttpAccessApi;
use access_sync::config::ApiConfig;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures;

/// A `wiremock` server mounted under `/api`
pub struct MockBackend {
    pub server: MockServer,
}

impl MockBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    pub fn config(&self, token: Option<&str>) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url(),
            timeout_secs: 5,
            token: token.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn client(&self, token: Option<&str>) -> HttpAccessApi {
        HttpAccessApi::from_config(&self.config(token)).expect("client should build")
    }

    /// Serve `body` for `GET /api/{endpoint}`
    pub async fn mount_get(&self, endpoint: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/{}", endpoint)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serve the fixture catalogs with the given assignments
    pub async fn mount_catalogs(&self, assignments: &[(i64, i64)]) {
        self.mount_get("roles", fixtures::roles()).await;
        self.mount_get("permissions", fixtures::permissions()).await;
        self.mount_get("role-permissions", fixtures::assignments(assignments))
            .await;
    }
}
