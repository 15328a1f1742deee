//! Matrix session and principal resolution over HTTP

use crate::common::{MockBackend, fixtures};
use crate::{assert_err, assert_ok};
use access_sync::config::MatrixConfig;
use access_sync::{
    ActionKind, Coverage, MatrixSession, PermissionId, PrincipalResolver, PrivilegeClassifier,
    RoleId, SessionContext, SessionUser, SyncError, ToggleOutcome,
};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

async fn load(backend: &MockBackend) -> MatrixSession {
    let api = Arc::new(backend.client(Some("t")));
    assert_ok!(MatrixSession::load(api, MatrixConfig::default()).await)
}

#[tokio::test]
async fn test_load_and_grant() {
    let backend = MockBackend::start().await;
    backend
        .mount_catalogs(&[(fixtures::EDITOR, fixtures::POSTS_READ)])
        .await;
    Mock::given(method("POST"))
        .and(path("/api/role-permissions"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&backend.server)
        .await;

    let session = load(&backend).await;
    let editor = RoleId(fixtures::EDITOR);

    let outcome = assert_ok!(
        session
            .cells()
            .toggle(editor, "posts", ActionKind::Create)
            .await
    );

    assert_eq!(outcome, ToggleOutcome::Committed { granted: true });
    assert_eq!(
        session.with_view(|view| view.coverage(editor, "posts")),
        Coverage {
            granted: 2,
            total: 4
        }
    );
}

#[tokio::test]
async fn test_rejected_revoke_is_rolled_back() {
    let backend = MockBackend::start().await;
    backend
        .mount_catalogs(&[(fixtures::ADMIN, fixtures::COMMENTS_DELETE)])
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/role-permissions/1/23"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .expect(1)
        .mount(&backend.server)
        .await;

    let session = load(&backend).await;
    let admin = RoleId(fixtures::ADMIN);

    let err = assert_err!(
        session
            .cells()
            .toggle(admin, "comments", ActionKind::Delete)
            .await
    );

    assert!(matches!(err, SyncError::UpdateFailed { granted: false, .. }));
    assert!(err.to_string().contains("database unavailable"));
    assert!(
        session
            .store()
            .read()
            .has_assignment(admin, PermissionId(fixtures::COMMENTS_DELETE))
    );
    assert!(session.cells().pending_locks().is_empty());
}

#[tokio::test]
async fn test_catalog_failure_fails_load() {
    let backend = MockBackend::start().await;
    backend.mount_get("roles", fixtures::roles()).await;
    backend.mount_get("permissions", fixtures::permissions()).await;
    Mock::given(method("GET"))
        .and(path("/api/role-permissions"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&backend.server)
        .await;

    let api = Arc::new(backend.client(Some("t")));
    let err = assert_err!(MatrixSession::load(api, MatrixConfig::default()).await);
    assert!(matches!(err, SyncError::LoadFailed(_)));
}

#[tokio::test]
async fn test_resolver_classifies_fetched_profile() {
    let backend = MockBackend::start().await;
    backend
        .mount_get("user", fixtures::profile(7, &["Moderator"]))
        .await;

    let resolver = PrincipalResolver::new(
        Arc::new(backend.client(Some("t"))),
        PrivilegeClassifier::default(),
    );
    let context = SessionContext::new(Some("t".to_string()), SessionUser::default());

    let (principal, verdict) = resolver.evaluate(&context).await;

    assert_eq!(principal.user.username.as_deref(), Some("user7"));
    assert!(verdict.is_moderator);
    assert!(verdict.can_delete_any);
    assert!(!verdict.is_administrator);
}
