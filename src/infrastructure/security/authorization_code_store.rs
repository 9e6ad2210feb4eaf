// src/infrastructure/security/authorization_code_store.rs
use crate::application::ApplicationResult;
use crate::application::ports::authorization_code::{AuthorizationCodeStore, CodeLookup};
use crate::domain::authorization_code::{AuthorizationCode, CodeId, CodeState};
use crate::domain::errors::DomainError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Inner {
    codes: HashMap<CodeId, AuthorizationCode>,
    // (client_id, code) -> code_id
    index: HashMap<(String, String), CodeId>,
}

/// Process-local code store. Every operation runs under one lock, which gives
/// `validate_and_fetch` and `claim` their atomicity.
#[derive(Default)]
pub struct InMemoryAuthorizationCodeStore {
    inner: Mutex<Inner>,
}

impl InMemoryAuthorizationCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current record, for inspection.
    pub fn get(&self, code_id: &CodeId) -> Option<AuthorizationCode> {
        self.lock().codes.get(code_id).cloned()
    }
}

fn find<'a>(inner: &'a mut Inner, code_id: &CodeId) -> ApplicationResult<&'a mut AuthorizationCode> {
    inner
        .codes
        .get_mut(code_id)
        .ok_or_else(|| DomainError::NotFound(format!("authorization code {code_id}")).into())
}

#[async_trait]
impl AuthorizationCodeStore for InMemoryAuthorizationCodeStore {
    async fn insert(&self, code: AuthorizationCode) -> ApplicationResult<()> {
        let mut guard = self.lock();
        let key = (code.client_id.clone(), code.code.clone());
        if guard.index.contains_key(&key) || guard.codes.contains_key(&code.code_id) {
            return Err(DomainError::Conflict("authorization code already exists".into()).into());
        }
        guard.index.insert(key, code.code_id.clone());
        guard.codes.insert(code.code_id.clone(), code);
        Ok(())
    }

    async fn validate_and_fetch(
        &self,
        client_id: &str,
        code: &str,
    ) -> ApplicationResult<Option<CodeLookup>> {
        let mut guard = self.lock();
        let Some(code_id) = guard
            .index
            .get(&(client_id.to_string(), code.to_string()))
            .cloned()
        else {
            return Ok(None);
        };
        let Some(record) = guard.codes.get_mut(&code_id) else {
            return Ok(None);
        };

        let snapshot = record.clone();
        let was_active = snapshot.is_active();
        if was_active {
            record.state = CodeState::Revoked;
        }
        Ok(Some(CodeLookup {
            code: snapshot,
            was_active,
        }))
    }

    async fn claim(&self, code_id: &CodeId) -> ApplicationResult<bool> {
        let mut guard = self.lock();
        match guard.codes.get_mut(code_id) {
            Some(record) if record.is_active() => {
                record.state = CodeState::Revoked;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn set_state(&self, code_id: &CodeId, state: CodeState) -> ApplicationResult<()> {
        let mut guard = self.lock();
        let record = find(&mut guard, code_id)?;
        if !state.is_terminal() || !record.state.can_transition_to(state) {
            return Err(DomainError::IllegalTransition(state).into());
        }
        record.state = state;
        Ok(())
    }

    async fn bind_token(&self, code_id: &CodeId, token_id: &str) -> ApplicationResult<()> {
        let mut guard = self.lock();
        let record = find(&mut guard, code_id)?;
        match record.bound_token_id.as_deref() {
            Some(existing) if existing != token_id => {
                return Err(DomainError::Conflict(format!(
                    "authorization code {code_id} is already bound to another token"
                ))
                .into());
            }
            _ => {}
        }
        record.bound_token_id = Some(token_id.to_string());
        record.state = CodeState::Inactive;
        Ok(())
    }
}
