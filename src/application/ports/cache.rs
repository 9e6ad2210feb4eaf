use crate::application::ApplicationResult;
use crate::domain::{access_token::AccessToken, authorization_code::AuthorizationCode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Value stored in the grant cache. Entries are projections of durable rows
/// and may be dropped at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CacheEntry {
    AuthorizationCode(AuthorizationCode),
    AccessToken(AccessToken),
}

#[async_trait]
pub trait GrantCache: Send + Sync {
    async fn get(&self, key: &str) -> ApplicationResult<Option<CacheEntry>>;
    async fn put(&self, key: &str, entry: CacheEntry) -> ApplicationResult<()>;
    /// Evicting a missing key is not an error.
    async fn evict(&self, key: &str) -> ApplicationResult<()>;
}
