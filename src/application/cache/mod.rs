//! Read-through cache over authorization code and token lookups.
//!
//! The cache only saves store reads. Every transition that enforces single use
//! is committed to the store first, and any entry can vanish at any time.

pub mod keys;

use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::{
        authorization_code::{AuthorizationCodeStore, CodeLookup},
        cache::{CacheEntry, GrantCache},
    },
};
use crate::domain::{
    access_token::AccessToken,
    authorization_code::{AuthorizationCode, CodeState},
};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub struct CacheCoordinator {
    cache: Option<Arc<dyn GrantCache>>,
    enabled: bool,
}

impl CacheCoordinator {
    pub fn new(cache: Option<Arc<dyn GrantCache>>, enabled: bool) -> Self {
        Self { cache, enabled }
    }

    pub fn disabled() -> Self {
        Self::new(None, false)
    }

    pub fn is_enabled(&self) -> bool {
        self.backend().is_some()
    }

    fn backend(&self) -> Option<&Arc<dyn GrantCache>> {
        if self.enabled { self.cache.as_ref() } else { None }
    }

    /// Look a code up, preferring the cache.
    ///
    /// A cached record is only trusted after the store confirms the code was
    /// still `ACTIVE` by letting this caller claim it. A lost claim means the
    /// entry is stale: it is evicted and the store becomes the source.
    pub async fn fetch_code(
        &self,
        store: &dyn AuthorizationCodeStore,
        client_id: &str,
        code: &str,
    ) -> ApplicationResult<Option<CodeLookup>> {
        if let Some(cache) = self.backend() {
            let key = keys::authorization_code(client_id, code);
            match cache.get(&key).await? {
                Some(CacheEntry::AuthorizationCode(mut cached))
                    if cached.client_id == client_id && cached.code == code =>
                {
                    if store.claim(&cached.code_id).await? {
                        debug!(client_id, code_id = %cached.code_id, "authorization code served from cache");
                        cached.state = CodeState::Active;
                        return Ok(Some(CodeLookup {
                            code: cached,
                            was_active: true,
                        }));
                    }
                    debug!(client_id, code_id = %cached.code_id, "cached authorization code is stale");
                    cache.evict(&key).await?;
                }
                Some(_) => {
                    warn!(client_id, "unexpected cache entry under authorization code key");
                    cache.evict(&key).await?;
                }
                None => {
                    debug!(client_id, "authorization code info was not available in cache");
                }
            }
        }

        debug!(client_id, "retrieving authorization code information from store");
        store.validate_and_fetch(client_id, code).await
    }

    /// Populate the code entry. Called by the side that hands codes out.
    pub async fn cache_code(&self, code: &AuthorizationCode) -> ApplicationResult<()> {
        let Some(cache) = self.backend() else {
            return Ok(());
        };
        let key = keys::authorization_code(&code.client_id, &code.code);
        cache
            .put(&key, CacheEntry::AuthorizationCode(code.clone()))
            .await
    }

    /// Populate every key a token is addressable by.
    pub async fn cache_token(&self, token: &AccessToken) -> ApplicationResult<()> {
        let Some(cache) = self.backend() else {
            return Ok(());
        };
        for key in token_keys(token)? {
            cache.put(&key, CacheEntry::AccessToken(token.clone())).await?;
        }
        Ok(())
    }

    pub async fn evict_code(&self, client_id: &str, code: &str) -> ApplicationResult<()> {
        let Some(cache) = self.backend() else {
            return Ok(());
        };
        cache.evict(&keys::authorization_code(client_id, code)).await?;
        debug!(client_id, "cache was cleared for authorization code info");
        Ok(())
    }

    /// Evict the token key derived from a code record (client, user, scope,
    /// federated IdP, binding reference).
    pub async fn evict_code_token_key(&self, code: &AuthorizationCode) -> ApplicationResult<()> {
        let Some(cache) = self.backend() else {
            return Ok(());
        };
        let user = &code.authorized_user;
        let user_id = user
            .user_id()
            .ok_or_else(|| ApplicationError::missing_user_id(user))?;
        let key = keys::token_for_user(
            &code.client_id,
            user_id,
            &code.scope.as_scope_string(),
            user.federated_idp(),
            Some(code.token_binding_reference.as_str()),
        );
        cache.evict(&key).await?;
        debug!(client_id = %code.client_id, user = %user, "removed token from cache");
        Ok(())
    }

    /// Evict every key a revoked token is addressable by. Best effort: failures
    /// are logged and counted, never returned.
    pub async fn evict_token_footprint(&self, token: &AccessToken) -> usize {
        let Some(cache) = self.backend() else {
            return 0;
        };
        let keys = match token_keys(token) {
            Ok(keys) => keys,
            Err(err) => {
                error!(token_id = %token.token_id, error = %err, "cannot rebuild token cache keys");
                return 1;
            }
        };

        let mut failures = 0;
        for key in keys {
            if let Err(err) = cache.evict(&key).await {
                failures += 1;
                error!(token_id = %token.token_id, error = %err, "failed to evict token cache entry");
            }
        }
        debug!(client_id = %token.client_id, token_id = %token.token_id, "the access token was removed from the cache");
        failures
    }
}

fn token_keys(token: &AccessToken) -> ApplicationResult<Vec<String>> {
    let user = &token.authorized_user;
    let user_id = user
        .user_id()
        .ok_or_else(|| ApplicationError::missing_user_id(user))?;
    let scope = token.scope.as_scope_string();

    Ok(vec![
        keys::token_value(&token.access_token),
        keys::token_for_user(
            &token.client_id,
            user_id,
            &scope,
            user.federated_idp(),
            Some(token.token_binding_reference.as_str()),
        ),
        keys::token_for_user(
            &token.client_id,
            user_id,
            &scope,
            user.federated_idp(),
            None,
        ),
        keys::token_for_client_user(&token.client_id, user_id),
    ])
}
