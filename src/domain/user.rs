// src/domain/user.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// The resource owner an authorization code (and the tokens minted from it)
/// was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedUser {
    /// Stable subject identifier. Legacy rows may lack one; callers that need
    /// it for attribution must treat its absence as a data-integrity fault.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub federated_idp: Option<String>,
}

impl AuthorizedUser {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            username: username.into(),
            federated_idp: None,
        }
    }

    /// A user whose stable identifier could not be resolved.
    pub fn unresolved(username: impl Into<String>) -> Self {
        Self {
            user_id: None,
            username: username.into(),
            federated_idp: None,
        }
    }

    pub fn with_federated_idp(mut self, idp: impl Into<String>) -> Self {
        self.federated_idp = Some(idp.into());
        self
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn federated_idp(&self) -> Option<&str> {
        self.federated_idp
            .as_deref()
            .map(str::trim)
            .filter(|idp| !idp.is_empty())
    }

    /// Identifier safe to put in log lines.
    pub fn loggable_id(&self) -> &str {
        self.user_id().unwrap_or(&self.username)
    }
}

impl fmt::Display for AuthorizedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.federated_idp() {
            Some(idp) => write!(f, "{}@{}", self.username, idp),
            None => f.write_str(&self.username),
        }
    }
}
