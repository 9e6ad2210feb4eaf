use crate::domain::{
    authorization_code::{CodeId, Scope, TokenBindingReference},
    user::AuthorizedUser,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::ValidatedGrant;

pub const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";

/// Already-parsed token endpoint fields.
#[derive(Clone, Default)]
pub struct TokenRequest {
    pub grant_type: String,
    pub client_id: String,
    pub authorization_code: String,
    pub callback_uri: Option<String>,
    pub pkce_verifier: Option<String>,
}

impl TokenRequest {
    pub fn authorization_code(client_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            grant_type: AUTHORIZATION_CODE_GRANT.to_string(),
            client_id: client_id.into(),
            authorization_code: code.into(),
            callback_uri: None,
            pkce_verifier: None,
        }
    }

    pub fn with_callback_uri(mut self, callback_uri: impl Into<String>) -> Self {
        self.callback_uri = Some(callback_uri.into());
        self
    }

    pub fn with_pkce_verifier(mut self, verifier: impl Into<String>) -> Self {
        self.pkce_verifier = Some(verifier.into());
        self
    }
}

// The code and verifier are credentials; keep them out of debug output.
impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("grant_type", &self.grant_type)
            .field("client_id", &self.client_id)
            .field("callback_uri", &self.callback_uri)
            .field("pkce_verifier", &self.pkce_verifier.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

/// What the external token issuer needs to mint a token for a redeemed code.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub client_id: String,
    pub authorized_user: AuthorizedUser,
    pub scope: Scope,
    pub code_id: CodeId,
    pub token_binding_reference: TokenBindingReference,
    pub issue_refresh_token: bool,
}

impl TokenSubject {
    pub fn from_grant(grant: &ValidatedGrant, issue_refresh_token: bool) -> Self {
        Self {
            client_id: grant.client_id().to_string(),
            authorized_user: grant.authorized_user().clone(),
            scope: grant.scope().clone(),
            code_id: grant.code_id().clone(),
            token_binding_reference: grant.token_binding_reference().clone(),
            issue_refresh_token,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessTokenResponse {
    #[serde(skip)]
    pub token_id: String,
    pub access_token: String,
    #[serde(serialize_with = "scope_string")]
    pub scope: Scope,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

fn scope_string<S: serde::Serializer>(scope: &Scope, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&scope.as_scope_string())
}
