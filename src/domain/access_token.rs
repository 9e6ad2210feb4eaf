// src/domain/access_token.rs
use crate::domain::{
    authorization_code::{CodeId, Scope, TokenBindingReference},
    user::AuthorizedUser,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access token as persisted by the token-issuance subsystem. This crate only
/// flips `revoked` and reads the rest to rebuild cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub token_id: String,
    pub access_token: String,
    pub client_id: String,
    pub authorized_user: AuthorizedUser,
    pub scope: Scope,
    #[serde(default)]
    pub token_binding_reference: TokenBindingReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code_id: Option<CodeId>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub revoked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked_by: Option<String>,
}
