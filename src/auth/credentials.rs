//! Bearer credential sources
//!
//! The HTTP client asks a [`CredentialStore`] for a token on every request,
//! so a store may rotate tokens without the client being rebuilt.

use parking_lot::RwLock;
use std::fmt;

use crate::config::ENV_PREFIX;

/// Source of the bearer token attached to backend requests
pub trait CredentialStore: Send + Sync + fmt::Debug {
    /// The current token, if any
    fn bearer_token(&self) -> Option<String>;
}

/// Token held in memory, replaceable at runtime
#[derive(Default)]
pub struct StaticCredentials {
    token: RwLock<Option<String>>,
}

impl StaticCredentials {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self {
            token: RwLock::new(non_blank(token.into())),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_option(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token.and_then(non_blank)),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token.and_then(non_blank);
    }
}

impl CredentialStore for StaticCredentials {
    fn bearer_token(&self) -> Option<String> {
        self.token.read().clone()
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("token", &self.token.read().as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Token read from an environment variable on each request
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new<S: Into<String>>(var: S) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(format!("{}TOKEN", ENV_PREFIX))
    }
}

impl CredentialStore for EnvCredentials {
    fn bearer_token(&self) -> Option<String> {
        std::env::var(&self.var).ok().and_then(non_blank)
    }
}

fn non_blank(token: String) -> Option<String> {
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
