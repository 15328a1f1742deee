//! Session context and principal gathering
//!
//! A [`SessionContext`] is passed explicitly to the [`PrincipalResolver`]; no
//! session or token state is read from ambient storage.

use std::sync::Arc;
use tracing::{debug, warn};

use super::credentials::CredentialStore;
use super::rbac::{PrivilegeClassifier, PrivilegeVerdict};
use super::types::{Principal, SessionUser};
use crate::core::traits::AccessApi;

/// Token and locally cached claims of the current session
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub token: Option<String>,
    pub claims: SessionUser,
}

impl SessionContext {
    pub fn new(token: Option<String>, claims: SessionUser) -> Self {
        Self { token, claims }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a context from whatever token `credentials` currently holds
    pub fn from_credentials(credentials: &dyn CredentialStore, claims: SessionUser) -> Self {
        Self::new(credentials.bearer_token(), claims)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Merges session claims with a fresh profile and classifies the result
#[derive(Clone)]
pub struct PrincipalResolver {
    api: Arc<dyn AccessApi>,
    classifier: PrivilegeClassifier,
}

impl PrincipalResolver {
    pub fn new(api: Arc<dyn AccessApi>, classifier: PrivilegeClassifier) -> Self {
        Self { api, classifier }
    }

    pub fn classifier(&self) -> &PrivilegeClassifier {
        &self.classifier
    }

    /// Gather the principal for `context`
    ///
    /// Without a token the principal is anonymous. A failed profile fetch
    /// falls back to the cached claims, so resolution never fails.
    pub async fn resolve(&self, context: &SessionContext) -> Principal {
        if !context.is_authenticated() {
            debug!("No session token, resolving anonymous principal");
            return Principal::anonymous();
        }

        let user = match self.api.fetch_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "Profile fetch failed, using session claims");
                context.claims.clone()
            }
        };

        Principal {
            user,
            roles: context.claims.roles.clone(),
            permissions: context.claims.permissions.clone(),
        }
    }

    /// Resolve and classify in one step
    pub async fn evaluate(&self, context: &SessionContext) -> (Principal, PrivilegeVerdict) {
        let principal = self.resolve(context).await;
        let verdict = self.classifier.classify_principal(&principal);
        debug!(
            user_id = ?principal.user.id,
            is_administrator = verdict.is_administrator,
            is_moderator = verdict.is_moderator,
            can_delete_any = verdict.can_delete_any,
            "Principal classified"
        );
        (principal, verdict)
    }
}

impl std::fmt::Debug for PrincipalResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrincipalResolver")
            .field("classifier", &self.classifier)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::StaticCredentials;
    use crate::auth::types::{ClaimedPermission, ClaimedRole};
    use crate::auth::rbac::UserId;
    use crate::core::traits::MockAccessApi;
    use crate::utils::error::SyncError;

    fn claims() -> SessionUser {
        SessionUser {
            id: Some(UserId(7)),
            username: Some("camille".to_string()),
            roles: vec![ClaimedRole::named("Editor")],
            permissions: vec![ClaimedPermission::new("comments", "Moderate comments")],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_anonymous_context_skips_profile() {
        let mut api = MockAccessApi::new();
        api.expect_fetch_profile().never();
        let resolver = PrincipalResolver::new(Arc::new(api), PrivilegeClassifier::default());

        let (principal, verdict) = resolver.evaluate(&SessionContext::anonymous()).await;

        assert!(principal.user.is_anonymous());
        assert_eq!(verdict, PrivilegeVerdict::default());
    }

    #[tokio::test]
    async fn test_profile_merges_with_claims() {
        let mut api = MockAccessApi::new();
        api.expect_fetch_profile().times(1).returning(|| {
            Ok(SessionUser {
                id: Some(UserId(7)),
                roles: vec![ClaimedRole::named("Administrator")],
                ..Default::default()
            })
        });
        let resolver = PrincipalResolver::new(Arc::new(api), PrivilegeClassifier::default());
        let context = SessionContext::new(Some("token".to_string()), claims());

        let (principal, verdict) = resolver.evaluate(&context).await;

        assert_eq!(principal.roles, vec![ClaimedRole::named("Editor")]);
        assert!(verdict.is_administrator);
        assert!(verdict.is_moderator);
        assert!(verdict.can_delete_any);
    }

    #[tokio::test]
    async fn test_profile_failure_falls_back_to_claims() {
        let mut api = MockAccessApi::new();
        api.expect_fetch_profile()
            .times(1)
            .returning(|| Err(SyncError::unauthorized("401: expired")));
        let resolver = PrincipalResolver::new(Arc::new(api), PrivilegeClassifier::default());
        let context = SessionContext::new(Some("token".to_string()), claims());

        let (principal, verdict) = resolver.evaluate(&context).await;

        assert_eq!(principal.user, claims());
        assert!(!verdict.is_administrator);
        assert!(verdict.is_moderator);
        assert!(verdict.can_delete_any);
    }

    #[test]
    fn test_context_from_credentials() {
        let context = SessionContext::from_credentials(&StaticCredentials::new("t"), claims());
        assert!(context.is_authenticated());

        let context =
            SessionContext::from_credentials(&StaticCredentials::anonymous(), SessionUser::default());
        assert!(!context.is_authenticated());
    }
}
