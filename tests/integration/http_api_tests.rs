//! HTTP client tests against the mock backend

use crate::common::{MockBackend, fixtures};
use crate::{assert_err, assert_ok};
use access_sync::{AccessApi, ActionKind, PermissionId, RoleId, SyncError, UserId};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_list_roles_sends_bearer_token() {
    let backend = MockBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/roles"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::roles()))
        .expect(1)
        .mount(&backend.server)
        .await;

    let roles = assert_ok!(backend.client(Some("secret")).list_roles().await);

    assert_eq!(roles.len(), 2);
    assert_eq!(roles[1].id, RoleId(fixtures::EDITOR));
    assert_eq!(roles[1].name, "Editor");
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_authorization() {
    let backend = MockBackend::start().await;
    backend.mount_get("roles", fixtures::roles()).await;

    assert_ok!(backend.client(None).list_roles().await);

    let requests = backend.server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_list_permissions_skips_unknown_actions() {
    let backend = MockBackend::start().await;
    backend.mount_get("permissions", fixtures::permissions()).await;

    let permissions = assert_ok!(backend.client(Some("t")).list_permissions().await);

    assert_eq!(permissions.len(), 8);
    assert_eq!(permissions[0].action, ActionKind::Create);
    assert!(permissions.iter().all(|p| p.id != PermissionId(99)));
}

#[tokio::test]
async fn test_create_role_permission_posts_ids() {
    let backend = MockBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/role-permissions"))
        .and(body_json(json!({ "role_id": 2, "permission_id": 10 })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&backend.server)
        .await;

    let api = backend.client(Some("t"));
    assert_ok!(
        api.create_role_permission(RoleId(2), PermissionId(10))
            .await
    );
}

#[tokio::test]
async fn test_delete_endpoints_use_path_ids() {
    let backend = MockBackend::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/role-permissions/2/10"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/userrole/5/roles/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend.server)
        .await;

    let api = backend.client(Some("t"));
    assert_ok!(
        api.delete_role_permission(RoleId(2), PermissionId(10))
            .await
    );
    assert_ok!(api.delete_user_role(UserId(5), RoleId(1)).await);
}

#[tokio::test]
async fn test_error_statuses_are_mapped() {
    let backend = MockBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/roles"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/permissions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&backend.server)
        .await;

    let api = backend.client(Some("t"));

    let err = assert_err!(api.list_roles().await);
    assert!(matches!(err, SyncError::Unauthorized(ref m) if m == "403: forbidden"));

    let err = assert_err!(api.list_permissions().await);
    assert!(matches!(err, SyncError::Api { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_body_is_a_serialization_error() {
    let backend = MockBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/role-permissions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&backend.server)
        .await;

    let err = assert_err!(backend.client(Some("t")).list_role_permissions().await);
    assert!(matches!(err, SyncError::Serialization(_)));
}

#[tokio::test]
async fn test_fetch_profile() {
    let backend = MockBackend::start().await;
    backend
        .mount_get("user", fixtures::profile(7, &["Moderator"]))
        .await;

    let user = assert_ok!(backend.client(Some("t")).fetch_profile().await);
    assert_eq!(user.id, Some(UserId(7)));
    assert_eq!(user.roles[0].name, "Moderator");

    let err = assert_err!(backend.client(None).fetch_profile().await);
    assert!(matches!(err, SyncError::Unauthorized(_)));
    let requests = backend.server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
}
