use crate::application::ApplicationResult;
use crate::domain::access_token::AccessToken;
use async_trait::async_trait;
use std::{collections::HashMap, fmt, sync::Arc};

/// Listener notified after the system revoked a token on its own initiative.
#[async_trait]
pub trait TokenEventInterceptor: Send + Sync {
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool {
        true
    }

    async fn on_post_token_revocation(
        &self,
        token: &AccessToken,
        metadata: &HashMap<String, String>,
    ) -> ApplicationResult<()>;
}

/// Interceptors registered at construction time.
#[derive(Clone, Default)]
pub struct InterceptorRegistry {
    interceptors: Vec<Arc<dyn TokenEventInterceptor>>,
}

impl InterceptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, interceptor: Arc<dyn TokenEventInterceptor>) -> Self {
        self.register(interceptor);
        self
    }

    pub fn register(&mut self, interceptor: Arc<dyn TokenEventInterceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Notify every enabled interceptor. Failures are logged and swallowed;
    /// the number of failed interceptors is returned.
    pub async fn notify_post_revocation(
        &self,
        token: &AccessToken,
        metadata: &HashMap<String, String>,
    ) -> usize {
        let mut failures = 0;
        for interceptor in self.interceptors.iter().filter(|i| i.is_enabled()) {
            if let Err(err) = interceptor.on_post_token_revocation(token, metadata).await {
                failures += 1;
                tracing::error!(
                    interceptor = interceptor.name(),
                    token_id = %token.token_id,
                    error = %err,
                    "error occurred when invoking post access token revoke listener"
                );
            }
        }
        failures
    }
}

impl fmt::Debug for InterceptorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.interceptors.iter().map(|i| i.name()))
            .finish()
    }
}
