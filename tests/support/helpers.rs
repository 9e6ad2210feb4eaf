// tests/support/helpers.rs
use super::builders::{CALLBACK, CLIENT_ID};
use super::mocks::{CountingInterceptor, FixedClock, RecordingCodeStore, RecordingTokenIssuer};
use authcode_grant::application::{
    commands::authorization_code::AuthorizationCodeGrantHandler,
    dto::TokenRequest,
    error::{ApplicationError, FailureCause},
    ports::{
        app_policy::AppPolicy,
        cache::GrantCache,
        interceptor::{InterceptorRegistry, TokenEventInterceptor},
    },
    services::GrantServices,
};
use authcode_grant::config::GrantConfig;
use authcode_grant::domain::authorization_code::AuthorizationCode;
use authcode_grant::infrastructure::{
    cache::InMemoryGrantCache,
    security::{
        access_token_store::InMemoryAccessTokenStore, app_policy::InMemoryAppPolicyRepository,
        pkce::Rfc7636PkceVerifier,
    },
};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Grant services wired against in-memory adapters, with handles kept for
/// assertions.
pub struct Harness {
    pub code_store: Arc<RecordingCodeStore>,
    pub token_store: Arc<InMemoryAccessTokenStore>,
    pub cache: Arc<InMemoryGrantCache>,
    pub app_policies: Arc<InMemoryAppPolicyRepository>,
    pub issuer: Arc<RecordingTokenIssuer>,
    pub interceptor: Arc<CountingInterceptor>,
    pub clock: Arc<FixedClock>,
    pub services: GrantServices,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(GrantConfig::default())
    }

    pub fn with_config(config: GrantConfig) -> Self {
        Self::build(config, Vec::new())
    }

    /// `extra` interceptors run before the counting one.
    pub fn with_interceptors(extra: Vec<Arc<dyn TokenEventInterceptor>>) -> Self {
        Self::build(GrantConfig::default(), extra)
    }

    fn build(config: GrantConfig, extra: Vec<Arc<dyn TokenEventInterceptor>>) -> Self {
        let code_store = Arc::new(RecordingCodeStore::new());
        let token_store = Arc::new(InMemoryAccessTokenStore::new());
        let cache = Arc::new(InMemoryGrantCache::new());
        let app_policies =
            Arc::new(InMemoryAppPolicyRepository::new().with(AppPolicy::new(CLIENT_ID)));
        let issuer = Arc::new(RecordingTokenIssuer::new(token_store.clone()));
        let interceptor = Arc::new(CountingInterceptor::new());
        let clock = Arc::new(FixedClock::at_fixed_now());

        let mut interceptors = InterceptorRegistry::new();
        for listener in extra {
            interceptors.register(listener);
        }
        interceptors.register(interceptor.clone());

        let services = GrantServices::new(
            &config,
            code_store.clone(),
            token_store.clone(),
            Some(cache.clone() as Arc<dyn GrantCache>),
            Arc::new(Rfc7636PkceVerifier::new()),
            app_policies.clone(),
            issuer.clone(),
            interceptors,
            clock.clone(),
        );

        Self {
            code_store,
            token_store,
            cache,
            app_policies,
            issuer,
            interceptor,
            clock,
            services,
        }
    }

    pub fn handler(&self) -> Arc<AuthorizationCodeGrantHandler> {
        self.services.authorization_code()
    }

    /// Persist `code` and populate its cache entry, as the authorization
    /// endpoint does when it hands a code out.
    pub async fn seed(&self, code: AuthorizationCode) -> AuthorizationCode {
        use authcode_grant::application::ports::authorization_code::AuthorizationCodeStore;

        self.code_store.insert(code.clone()).await.unwrap();
        self.services.cache().cache_code(&code).await.unwrap();
        code
    }

    pub fn stored(&self, code: &AuthorizationCode) -> AuthorizationCode {
        self.code_store.get(&code.code_id)
    }
}

/// Token request presenting `code` with the default callback.
pub fn request_for(code: &AuthorizationCode) -> TokenRequest {
    TokenRequest::authorization_code(code.client_id.clone(), code.code.clone())
        .with_callback_uri(CALLBACK)
}

pub fn cause_of(err: &ApplicationError) -> FailureCause {
    err.failure_cause()
        .unwrap_or_else(|| panic!("expected invalid_grant, got {err:?}"))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Log output captured from a thread-local subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Capture DEBUG and above for the current thread until the guard drops.
/// Only reliable on the current-thread test runtime.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
