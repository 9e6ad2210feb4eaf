// tests/support/builders.rs
use super::mocks::fixed_now;
use authcode_grant::domain::{
    access_token::AccessToken,
    authorization_code::{
        AuthorizationCode, CodeState, NewAuthorizationCode, Scope, TokenBindingReference,
    },
    user::AuthorizedUser,
};
use chrono::Duration;

pub const CLIENT_ID: &str = "cid1";
pub const CODE: &str = "abc123";
pub const CALLBACK: &str = "https://client.example.com/callback";

/// Authorization code as the authorization endpoint would have stored it.
/// Defaults: issued 10 s before `fixed_now()`, valid for an hour, no PKCE.
pub struct AuthorizationCodeBuilder {
    client_id: String,
    code: String,
    user: AuthorizedUser,
    scope: Scope,
    callback_url: Option<String>,
    pkce_challenge: Option<String>,
    pkce_challenge_method: Option<String>,
    issued_ago: Duration,
    validity: Duration,
    binding: TokenBindingReference,
    state: CodeState,
    bound_token_id: Option<String>,
}

impl AuthorizationCodeBuilder {
    pub fn new() -> Self {
        Self {
            client_id: CLIENT_ID.into(),
            code: CODE.into(),
            user: AuthorizedUser::new("u-1", "alice"),
            scope: Scope::parse("openid profile"),
            callback_url: Some(CALLBACK.into()),
            pkce_challenge: None,
            pkce_challenge_method: None,
            issued_ago: Duration::seconds(10),
            validity: Duration::seconds(3600),
            binding: TokenBindingReference::default(),
            state: CodeState::Active,
            bound_token_id: None,
        }
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn user(mut self, user: AuthorizedUser) -> Self {
        self.user = user;
        self
    }

    pub fn callback_url(mut self, url: Option<&str>) -> Self {
        self.callback_url = url.map(str::to_string);
        self
    }

    pub fn pkce(mut self, challenge: &str, method: Option<&str>) -> Self {
        self.pkce_challenge = Some(challenge.into());
        self.pkce_challenge_method = method.map(str::to_string);
        self
    }

    pub fn issued_ago(mut self, ago: Duration) -> Self {
        self.issued_ago = ago;
        self
    }

    pub fn validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    pub fn binding(mut self, reference: &str) -> Self {
        self.binding = TokenBindingReference::new(Some(reference));
        self
    }

    /// Already redeemed for `token_id`.
    pub fn consumed_by(mut self, token_id: &str) -> Self {
        self.state = CodeState::Inactive;
        self.bound_token_id = Some(token_id.into());
        self
    }

    pub fn build(self) -> AuthorizationCode {
        let mut code = AuthorizationCode::issue(
            NewAuthorizationCode {
                client_id: self.client_id,
                code: self.code,
                authorized_user: self.user,
                scope: self.scope,
                callback_url: self.callback_url,
                pkce_challenge: self.pkce_challenge,
                pkce_challenge_method: self.pkce_challenge_method,
                validity_period: self.validity,
                token_binding_reference: self.binding,
            },
            fixed_now() - self.issued_ago,
        );
        code.state = self.state;
        code.bound_token_id = self.bound_token_id;
        code
    }
}

impl Default for AuthorizationCodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Live token minted from `code`.
pub fn token_for(code: &AuthorizationCode, token_id: &str) -> AccessToken {
    AccessToken {
        token_id: token_id.into(),
        access_token: format!("at-{token_id}"),
        client_id: code.client_id.clone(),
        authorized_user: code.authorized_user.clone(),
        scope: code.scope.clone(),
        token_binding_reference: code.token_binding_reference.clone(),
        authorization_code_id: Some(code.code_id.clone()),
        issued_at: fixed_now(),
        expires_at: fixed_now() + Duration::hours(1),
        revoked: false,
        revoked_by: None,
    }
}
