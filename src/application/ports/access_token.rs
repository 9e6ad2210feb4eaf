use crate::application::ApplicationResult;
use crate::domain::access_token::AccessToken;
use async_trait::async_trait;

#[async_trait]
pub trait AccessTokenStore: Send + Sync {
    async fn insert(&self, token: AccessToken) -> ApplicationResult<()>;

    /// `None` when no token with this id exists.
    async fn get_token_by_id(&self, token_id: &str) -> ApplicationResult<Option<AccessToken>>;

    /// Mark the token revoked, attributing the revocation to `revoking_user_id`.
    async fn revoke_token(&self, token_id: &str, revoking_user_id: &str) -> ApplicationResult<()>;
}
