use crate::domain::{
    authorization_code::{AuthorizationCode, CodeId, Scope, TokenBindingReference},
    user::AuthorizedUser,
};
use std::fmt;

/// Immutable result of a successful `validate_grant`, handed to `issue`.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedGrant {
    client_id: String,
    code: String,
    code_id: CodeId,
    authorized_user: AuthorizedUser,
    scope: Scope,
    bound_token_id: Option<String>,
    token_binding_reference: TokenBindingReference,
}

impl ValidatedGrant {
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn code_id(&self) -> &CodeId {
        &self.code_id
    }

    pub fn authorized_user(&self) -> &AuthorizedUser {
        &self.authorized_user
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn bound_token_id(&self) -> Option<&str> {
        self.bound_token_id.as_deref()
    }

    pub fn token_binding_reference(&self) -> &TokenBindingReference {
        &self.token_binding_reference
    }
}

impl From<AuthorizationCode> for ValidatedGrant {
    fn from(code: AuthorizationCode) -> Self {
        Self {
            client_id: code.client_id,
            code: code.code,
            code_id: code.code_id,
            authorized_user: code.authorized_user,
            scope: code.scope,
            bound_token_id: code.bound_token_id,
            token_binding_reference: code.token_binding_reference,
        }
    }
}

impl fmt::Debug for ValidatedGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedGrant")
            .field("client_id", &self.client_id)
            .field("code_id", &self.code_id)
            .field("authorized_user", &self.authorized_user)
            .field("scope", &self.scope)
            .field("bound_token_id", &self.bound_token_id)
            .finish_non_exhaustive()
    }
}
