//! Heuristic privilege classification
//!
//! Classification looks at display names, not ids: a principal is an
//! administrator or moderator when one of its role or permission names
//! matches the corresponding [`Vocabulary`]. Absence of a match is a denial.

use serde::Serialize;

use super::vocabulary::Vocabulary;
use crate::auth::types::{ClaimedPermission, ClaimedRole, Principal, SessionUser};

/// Privilege verdict for one principal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrivilegeVerdict {
    pub is_administrator: bool,
    pub is_moderator: bool,
    pub can_delete_any: bool,
}

/// Pure classifier over an injected vocabulary
#[derive(Debug, Clone, Default)]
pub struct PrivilegeClassifier {
    vocabulary: Vocabulary,
}

impl PrivilegeClassifier {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Classify the union of the given grants and those carried by `user`
    pub fn classify(
        &self,
        permissions: &[ClaimedPermission],
        roles: &[ClaimedRole],
        user: &SessionUser,
    ) -> PrivilegeVerdict {
        let vocab = &self.vocabulary;
        let permissions: Vec<&ClaimedPermission> =
            permissions.iter().chain(user.permissions.iter()).collect();
        let roles: Vec<&ClaimedRole> = roles.iter().chain(user.roles.iter()).collect();

        let moderated: Vec<&ClaimedPermission> = permissions
            .iter()
            .copied()
            .filter(|p| vocab.is_moderated_resource(&p.resource))
            .collect();

        let role_is_admin = roles.iter().any(|r| vocab.is_administrator(&r.name));
        let role_is_moderator = roles
            .iter()
            .any(|r| vocab.is_moderation(&r.name) || vocab.is_administrator(&r.name));

        let is_moderator = role_is_moderator
            || moderated
                .iter()
                .any(|p| vocab.is_moderation(&p.name) || vocab.is_administrator(&p.name));
        let is_administrator =
            role_is_admin || permissions.iter().any(|p| vocab.is_administrator(&p.name));
        let can_delete_any =
            is_administrator || is_moderator || moderated.iter().any(|p| vocab.is_deletion(&p.name));

        PrivilegeVerdict {
            is_administrator,
            is_moderator,
            can_delete_any,
        }
    }

    pub fn classify_principal(&self, principal: &Principal) -> PrivilegeVerdict {
        self.classify(&principal.permissions, &principal.roles, &principal.user)
    }
}

/// Classify with the built-in vocabulary
pub fn classify(
    permissions: &[ClaimedPermission],
    roles: &[ClaimedRole],
    user: &SessionUser,
) -> PrivilegeVerdict {
    PrivilegeClassifier::default().classify(permissions, roles, user)
}
