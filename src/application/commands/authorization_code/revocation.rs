use crate::application::{
    ApplicationResult,
    cache::CacheCoordinator,
    error::ApplicationError,
    ports::{access_token::AccessTokenStore, interceptor::InterceptorRegistry},
};
use crate::domain::authorization_code::AuthorizationCode;
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, warn};

pub const REVOCATION_REASON: &str = "authorization_code_replay";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeOutcome {
    NoBoundToken,
    TokenNotFound,
    AlreadyRevoked,
    Revoked { token_id: String },
}

/// Invalidates the token minted from a code once that code is presented again.
pub struct RevocationCascade {
    token_store: Arc<dyn AccessTokenStore>,
    cache: Arc<CacheCoordinator>,
    interceptors: InterceptorRegistry,
}

impl RevocationCascade {
    pub fn new(
        token_store: Arc<dyn AccessTokenStore>,
        cache: Arc<CacheCoordinator>,
        interceptors: InterceptorRegistry,
    ) -> Self {
        Self {
            token_store,
            cache,
            interceptors,
        }
    }

    pub async fn run(&self, code: &AuthorizationCode) -> ApplicationResult<CascadeOutcome> {
        let Some(token_id) = code.bound_token_id.as_deref() else {
            debug!(
                client_id = %code.client_id,
                code_id = %code.code_id,
                "no access token bound to the presented authorization code"
            );
            return Ok(CascadeOutcome::NoBoundToken);
        };

        let Some(token) = self.token_store.get_token_by_id(token_id).await? else {
            debug!(token_id, "access token bound to the authorization code no longer exists");
            return Ok(CascadeOutcome::TokenNotFound);
        };
        if token.revoked {
            debug!(token_id, "access token bound to the authorization code is already revoked");
            return Ok(CascadeOutcome::AlreadyRevoked);
        }

        let user = &code.authorized_user;
        let user_id = user
            .user_id()
            .ok_or_else(|| ApplicationError::missing_user_id(user))?;

        warn!(
            client_id = %code.client_id,
            code_id = %code.code_id,
            token_id,
            "authorization code presented again; revoking the access token issued from it"
        );
        self.token_store.revoke_token(token_id, user_id).await?;

        let mut revoked = token;
        revoked.revoked = true;
        revoked.revoked_by = Some(user_id.to_string());

        self.cache.evict_token_footprint(&revoked).await;

        let metadata = HashMap::from([
            ("reason".to_string(), REVOCATION_REASON.to_string()),
            ("client_id".to_string(), code.client_id.clone()),
            ("code_id".to_string(), code.code_id.to_string()),
        ]);
        self.interceptors
            .notify_post_revocation(&revoked, &metadata)
            .await;

        Ok(CascadeOutcome::Revoked {
            token_id: token_id.to_string(),
        })
    }
}
