use crate::application::ApplicationResult;
use crate::application::ports::access_token::AccessTokenStore;
use crate::domain::access_token::AccessToken;
use crate::domain::errors::DomainError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
pub struct InMemoryAccessTokenStore {
    // token_id -> AccessToken
    inner: Mutex<HashMap<String, AccessToken>>,
}

impl InMemoryAccessTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, AccessToken>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, token_id: &str) -> Option<AccessToken> {
        self.lock().get(token_id).cloned()
    }
}

#[async_trait]
impl AccessTokenStore for InMemoryAccessTokenStore {
    async fn insert(&self, token: AccessToken) -> ApplicationResult<()> {
        let mut guard = self.lock();
        if guard.contains_key(&token.token_id) {
            return Err(DomainError::Conflict("access token already exists".into()).into());
        }
        guard.insert(token.token_id.clone(), token);
        Ok(())
    }

    async fn get_token_by_id(&self, token_id: &str) -> ApplicationResult<Option<AccessToken>> {
        Ok(self.get(token_id))
    }

    async fn revoke_token(&self, token_id: &str, revoking_user_id: &str) -> ApplicationResult<()> {
        let mut guard = self.lock();
        let token = guard
            .get_mut(token_id)
            .ok_or_else(|| DomainError::NotFound(format!("access token {token_id}")))?;
        token.revoked = true;
        token.revoked_by = Some(revoking_user_id.to_string());
        Ok(())
    }
}
