//! Authentication and authorization
//!
//! Role/permission catalogs, the privilege classifier, session principals and
//! the credential sources used to reach the administration backend.

pub mod credentials;
pub mod rbac;
pub mod session;
pub mod types;

pub use credentials::{CredentialStore, EnvCredentials, StaticCredentials};
pub use rbac::{PrivilegeClassifier, PrivilegeVerdict, Vocabulary};
pub use session::{PrincipalResolver, SessionContext};
pub use types::{ClaimedPermission, ClaimedRole, Principal, SessionUser};
