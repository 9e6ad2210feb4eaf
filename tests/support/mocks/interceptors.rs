// tests/support/mocks/interceptors.rs
use async_trait::async_trait;
use authcode_grant::application::{
    ApplicationResult, error::ApplicationError, ports::interceptor::TokenEventInterceptor,
};
use authcode_grant::domain::{
    access_token::AccessToken,
    audit::{entity::AuditLog, repository::AuditLogRepository},
    errors::DomainResult,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Remembers every revocation it was told about.
#[derive(Default)]
pub struct CountingInterceptor {
    seen: Mutex<Vec<(AccessToken, HashMap<String, String>)>>,
}

impl CountingInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<(AccessToken, HashMap<String, String>)> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TokenEventInterceptor for CountingInterceptor {
    fn name(&self) -> &str {
        "counting"
    }

    async fn on_post_token_revocation(
        &self,
        token: &AccessToken,
        metadata: &HashMap<String, String>,
    ) -> ApplicationResult<()> {
        self.seen
            .lock()
            .unwrap()
            .push((token.clone(), metadata.clone()));
        Ok(())
    }
}

pub struct FailingInterceptor;

#[async_trait]
impl TokenEventInterceptor for FailingInterceptor {
    fn name(&self) -> &str {
        "failing"
    }

    async fn on_post_token_revocation(
        &self,
        _token: &AccessToken,
        _metadata: &HashMap<String, String>,
    ) -> ApplicationResult<()> {
        Err(ApplicationError::infrastructure("listener exploded"))
    }
}

/// Registered but switched off; must never be invoked.
pub struct DisabledInterceptor;

#[async_trait]
impl TokenEventInterceptor for DisabledInterceptor {
    fn name(&self) -> &str {
        "disabled"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn on_post_token_revocation(
        &self,
        _token: &AccessToken,
        _metadata: &HashMap<String, String>,
    ) -> ApplicationResult<()> {
        panic!("disabled interceptor must not be invoked");
    }
}

/// Audit repository capturing inserted rows.
#[derive(Default)]
pub struct CapturingAuditRepo {
    items: Mutex<Vec<AuditLog>>,
}

impl CapturingAuditRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<AuditLog> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLogRepository for CapturingAuditRepo {
    async fn insert(&self, log: AuditLog) -> DomainResult<()> {
        self.items.lock().unwrap().push(log);
        Ok(())
    }
}
