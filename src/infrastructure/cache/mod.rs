mod memory;
mod redis_cache;

pub use memory::InMemoryGrantCache;
pub use redis_cache::RedisGrantCache;

use crate::application::{error::ApplicationError, ports::cache::GrantCache};
use crate::config::GrantConfig;
use std::sync::Arc;

/// Cache backend selected by configuration: Redis when a URL is set,
/// otherwise in-process. `None` when caching is disabled.
pub fn from_config(config: &GrantConfig) -> Result<Option<Arc<dyn GrantCache>>, ApplicationError> {
    if !config.cache_enabled() {
        return Ok(None);
    }
    let cache: Arc<dyn GrantCache> = match config.redis_url() {
        Some(url) => Arc::new(RedisGrantCache::from_url(
            url,
            config.cache_prefix(),
            config.cache_ttl(),
        )?),
        None => Arc::new(InMemoryGrantCache::new()),
    };
    Ok(Some(cache))
}
