// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        cache::CacheCoordinator,
        commands::{
            authorization_code::{AuthorizationCodeGrantHandler, RevocationCascade},
            grant_handler::GrantHandlerRegistry,
        },
        dto::{AccessTokenResponse, TokenRequest},
        ports::{
            access_token::AccessTokenStore,
            app_policy::AppPolicyRepository,
            authorization_code::AuthorizationCodeStore,
            cache::GrantCache,
            interceptor::InterceptorRegistry,
            security::{PkceVerifier, TokenIssuer},
            time::Clock,
        },
    },
    config::GrantConfig,
};

/// Wires the grant handlers against their ports.
pub struct GrantServices {
    authorization_code: Arc<AuthorizationCodeGrantHandler>,
    cache: Arc<CacheCoordinator>,
    registry: GrantHandlerRegistry,
}

impl GrantServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: &GrantConfig,
        code_store: Arc<dyn AuthorizationCodeStore>,
        token_store: Arc<dyn AccessTokenStore>,
        cache: Option<Arc<dyn GrantCache>>,
        pkce_verifier: Arc<dyn PkceVerifier>,
        app_policies: Arc<dyn AppPolicyRepository>,
        token_issuer: Arc<dyn TokenIssuer>,
        interceptors: InterceptorRegistry,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = Arc::new(CacheCoordinator::new(cache, config.cache_enabled()));

        let cascade = RevocationCascade::new(
            Arc::clone(&token_store),
            Arc::clone(&cache),
            interceptors,
        );

        let authorization_code = Arc::new(AuthorizationCodeGrantHandler::new(
            Arc::clone(&code_store),
            Arc::clone(&cache),
            cascade,
            Arc::clone(&pkce_verifier),
            Arc::clone(&app_policies),
            Arc::clone(&token_issuer),
            Arc::clone(&clock),
            config.refresh_token_allowed(),
        ));

        let mut registry = GrantHandlerRegistry::new();
        registry.register(authorization_code.clone());

        Self {
            authorization_code,
            cache,
            registry,
        }
    }

    pub fn authorization_code(&self) -> Arc<AuthorizationCodeGrantHandler> {
        Arc::clone(&self.authorization_code)
    }

    pub fn cache(&self) -> Arc<CacheCoordinator> {
        Arc::clone(&self.cache)
    }

    pub fn registry(&self) -> &GrantHandlerRegistry {
        &self.registry
    }

    pub async fn exchange(&self, request: &TokenRequest) -> ApplicationResult<AccessTokenResponse> {
        self.registry.exchange(request).await
    }
}
