use crate::application::ApplicationResult;
use crate::application::ports::cache::{CacheEntry, GrantCache};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Unbounded process-local cache, used when no Redis URL is configured.
#[derive(Default)]
pub struct InMemoryGrantCache {
    inner: Mutex<HashMap<String, CacheEntry>>,
}

impl InMemoryGrantCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[async_trait]
impl GrantCache for InMemoryGrantCache {
    async fn get(&self, key: &str) -> ApplicationResult<Option<CacheEntry>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn put(&self, key: &str, entry: CacheEntry) -> ApplicationResult<()> {
        self.lock().insert(key.to_string(), entry);
        Ok(())
    }

    async fn evict(&self, key: &str) -> ApplicationResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}
