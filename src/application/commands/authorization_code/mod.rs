mod issue;
mod revocation;
mod service;
mod validate;
mod validator;

pub use revocation::{CascadeOutcome, REVOCATION_REASON, RevocationCascade};
pub use service::AuthorizationCodeGrantHandler;

use crate::application::{
    ApplicationResult,
    commands::grant_handler::GrantHandler,
    dto::{AUTHORIZATION_CODE_GRANT, AccessTokenResponse, TokenRequest, ValidatedGrant},
};
use async_trait::async_trait;

#[async_trait]
impl GrantHandler for AuthorizationCodeGrantHandler {
    fn grant_type(&self) -> &str {
        AUTHORIZATION_CODE_GRANT
    }

    async fn validate_grant(&self, request: &TokenRequest) -> ApplicationResult<ValidatedGrant> {
        AuthorizationCodeGrantHandler::validate_grant(self, request).await
    }

    // The resource owner already approved the delegation when the code was issued.
    async fn authorize_access_delegation(&self, _grant: &ValidatedGrant) -> ApplicationResult<bool> {
        Ok(true)
    }

    async fn issue(
        &self,
        _request: &TokenRequest,
        grant: &ValidatedGrant,
    ) -> ApplicationResult<AccessTokenResponse> {
        AuthorizationCodeGrantHandler::issue(self, grant).await
    }

    fn issue_refresh_token(&self) -> bool {
        AuthorizationCodeGrantHandler::issue_refresh_token(self)
    }
}
