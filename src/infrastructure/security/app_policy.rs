use crate::application::ApplicationResult;
use crate::application::ports::app_policy::{AppPolicy, AppPolicyRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Client policies held in memory, keyed by client id.
#[derive(Default)]
pub struct InMemoryAppPolicyRepository {
    inner: Mutex<HashMap<String, AppPolicy>>,
}

impl InMemoryAppPolicyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, policy: AppPolicy) -> Self {
        self.upsert(policy);
        self
    }

    pub fn upsert(&self, policy: AppPolicy) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(policy.client_id.clone(), policy);
    }
}

#[async_trait]
impl AppPolicyRepository for InMemoryAppPolicyRepository {
    async fn find_by_client_id(&self, client_id: &str) -> ApplicationResult<Option<AppPolicy>> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(client_id)
            .cloned())
    }
}
