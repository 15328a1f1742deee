//! Configuration driving the classifier and client

use crate::assert_ok;
use access_sync::auth::rbac::Vocabulary;
use access_sync::{
    ClaimedRole, Config, CredentialStore, HttpAccessApi, PrivilegeClassifier, SessionUser,
};
use std::io::Write;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_configured_vocabulary_extends_builtin_terms() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
classifier:
  admin_terms: ["root"]
  moderated_resource: "reviews"
"#
    )
    .unwrap();

    let config = assert_ok!(Config::from_file(file.path()).await);
    let classifier = PrivilegeClassifier::new(assert_ok!(Vocabulary::from_config(&config.classifier)));

    let verdict = classifier.classify(&[], &[ClaimedRole::named("Root")], &SessionUser::default());
    assert!(verdict.is_administrator);

    let verdict = classifier.classify(&[], &[ClaimedRole::named("Admin")], &SessionUser::default());
    assert!(verdict.is_administrator);
}

#[test]
fn test_client_from_default_config() {
    let config = Config::default();
    let api = assert_ok!(HttpAccessApi::from_config(&config.api));
    assert_eq!(api.base_url(), "http://localhost:8000/api");
    assert!(api.credentials().bearer_token().is_none());
}
