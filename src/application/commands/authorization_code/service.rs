use std::sync::Arc;

use super::revocation::RevocationCascade;
use crate::application::{
    cache::CacheCoordinator,
    ports::{
        app_policy::AppPolicyRepository,
        authorization_code::AuthorizationCodeStore,
        security::{PkceVerifier, TokenIssuer},
        time::Clock,
    },
};

/// Redeems `authorization_code` grants.
pub struct AuthorizationCodeGrantHandler {
    pub(super) code_store: Arc<dyn AuthorizationCodeStore>,
    pub(super) cache: Arc<CacheCoordinator>,
    pub(super) cascade: RevocationCascade,
    pub(super) pkce_verifier: Arc<dyn PkceVerifier>,
    pub(super) app_policies: Arc<dyn AppPolicyRepository>,
    pub(super) token_issuer: Arc<dyn TokenIssuer>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) refresh_token_allowed: bool,
}

impl AuthorizationCodeGrantHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code_store: Arc<dyn AuthorizationCodeStore>,
        cache: Arc<CacheCoordinator>,
        cascade: RevocationCascade,
        pkce_verifier: Arc<dyn PkceVerifier>,
        app_policies: Arc<dyn AppPolicyRepository>,
        token_issuer: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
        refresh_token_allowed: bool,
    ) -> Self {
        Self {
            code_store,
            cache,
            cascade,
            pkce_verifier,
            app_policies,
            token_issuer,
            clock,
            refresh_token_allowed,
        }
    }
}
