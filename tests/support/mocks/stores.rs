// tests/support/mocks/stores.rs
use async_trait::async_trait;
use authcode_grant::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::{
        authorization_code::{AuthorizationCodeStore, CodeLookup},
        cache::{CacheEntry, GrantCache},
    },
};
use authcode_grant::domain::authorization_code::{AuthorizationCode, CodeId, CodeState};
use authcode_grant::infrastructure::{
    cache::InMemoryGrantCache, security::authorization_code_store::InMemoryAuthorizationCodeStore,
};
use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// In-memory code store that records how it was driven.
#[derive(Default)]
pub struct RecordingCodeStore {
    inner: InMemoryAuthorizationCodeStore,
    fetches: AtomicUsize,
    claims: AtomicUsize,
    state_writes: Mutex<Vec<(CodeId, CodeState)>>,
    fail_state_writes: AtomicBool,
}

impl RecordingCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code_id: &CodeId) -> AuthorizationCode {
        self.inner.get(code_id).expect("code seeded in store")
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn claims(&self) -> usize {
        self.claims.load(Ordering::SeqCst)
    }

    pub fn state_writes(&self) -> Vec<(CodeId, CodeState)> {
        self.state_writes.lock().unwrap().clone()
    }

    pub fn writes_of(&self, state: CodeState) -> usize {
        self.state_writes()
            .iter()
            .filter(|(_, written)| *written == state)
            .count()
    }

    pub fn fail_state_writes(&self) {
        self.fail_state_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuthorizationCodeStore for RecordingCodeStore {
    async fn insert(&self, code: AuthorizationCode) -> ApplicationResult<()> {
        self.inner.insert(code).await
    }

    async fn validate_and_fetch(
        &self,
        client_id: &str,
        code: &str,
    ) -> ApplicationResult<Option<CodeLookup>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.validate_and_fetch(client_id, code).await
    }

    async fn claim(&self, code_id: &CodeId) -> ApplicationResult<bool> {
        self.claims.fetch_add(1, Ordering::SeqCst);
        self.inner.claim(code_id).await
    }

    async fn set_state(&self, code_id: &CodeId, state: CodeState) -> ApplicationResult<()> {
        if self.fail_state_writes.load(Ordering::SeqCst) {
            return Err(ApplicationError::infrastructure("code store unavailable"));
        }
        self.state_writes
            .lock()
            .unwrap()
            .push((code_id.clone(), state));
        self.inner.set_state(code_id, state).await
    }

    async fn bind_token(&self, code_id: &CodeId, token_id: &str) -> ApplicationResult<()> {
        self.inner.bind_token(code_id, token_id).await
    }
}

/// In-memory cache whose evictions can be made to fail.
#[derive(Default)]
pub struct FlakyGrantCache {
    inner: InMemoryGrantCache,
    fail_evictions: AtomicBool,
}

impl FlakyGrantCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_evictions(&self) {
        self.fail_evictions.store(true, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }
}

#[async_trait]
impl GrantCache for FlakyGrantCache {
    async fn get(&self, key: &str) -> ApplicationResult<Option<CacheEntry>> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, entry: CacheEntry) -> ApplicationResult<()> {
        self.inner.put(key, entry).await
    }

    async fn evict(&self, key: &str) -> ApplicationResult<()> {
        if self.fail_evictions.load(Ordering::SeqCst) {
            return Err(ApplicationError::infrastructure("cache unavailable"));
        }
        self.inner.evict(key).await
    }
}
