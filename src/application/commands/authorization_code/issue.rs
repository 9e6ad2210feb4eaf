use super::AuthorizationCodeGrantHandler;
use crate::application::{
    ApplicationResult,
    dto::{AccessTokenResponse, TokenSubject, ValidatedGrant},
};
use tracing::debug;

impl AuthorizationCodeGrantHandler {
    /// Mint a token for a validated grant and bind it to the code.
    pub async fn issue(&self, grant: &ValidatedGrant) -> ApplicationResult<AccessTokenResponse> {
        let subject = TokenSubject::from_grant(grant, self.refresh_token_allowed);
        let mut response = self.token_issuer.issue(subject).await?;

        if !self.refresh_token_allowed && response.refresh_token.take().is_some() {
            debug!(
                client_id = grant.client_id(),
                "refresh token dropped; not allowed for authorization code grants"
            );
        }

        self.code_store
            .bind_token(grant.code_id(), &response.token_id)
            .await?;
        self.cache
            .evict_code(grant.client_id(), grant.code())
            .await?;

        debug!(
            client_id = grant.client_id(),
            code_id = %grant.code_id(),
            token_id = %response.token_id,
            "access token issued for authorization code"
        );
        Ok(response)
    }

    pub fn issue_refresh_token(&self) -> bool {
        self.refresh_token_allowed
    }
}
