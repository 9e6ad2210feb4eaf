// tests/support/mocks/issuer.rs
use super::time::fixed_now;
use async_trait::async_trait;
use authcode_grant::application::{
    ApplicationResult,
    dto::{AccessTokenResponse, TokenSubject},
    ports::{access_token::AccessTokenStore, security::TokenIssuer},
};
use authcode_grant::domain::access_token::AccessToken;
use chrono::Duration;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Issuer that persists sequentially numbered tokens and always offers a
/// refresh token, so callers can be checked for stripping it.
pub struct RecordingTokenIssuer {
    tokens: Arc<dyn AccessTokenStore>,
    counter: AtomicUsize,
    subjects: Mutex<Vec<TokenSubject>>,
}

impl RecordingTokenIssuer {
    pub fn new(tokens: Arc<dyn AccessTokenStore>) -> Self {
        Self {
            tokens,
            counter: AtomicUsize::new(0),
            subjects: Mutex::new(Vec::new()),
        }
    }

    pub fn issued(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn subjects(&self) -> Vec<TokenSubject> {
        self.subjects.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenIssuer for RecordingTokenIssuer {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AccessTokenResponse> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let issued_at = fixed_now();
        let expires_at = issued_at + Duration::hours(1);

        let token = AccessToken {
            token_id: format!("tok-{n}"),
            access_token: format!("at-{n}"),
            client_id: subject.client_id.clone(),
            authorized_user: subject.authorized_user.clone(),
            scope: subject.scope.clone(),
            token_binding_reference: subject.token_binding_reference.clone(),
            authorization_code_id: Some(subject.code_id.clone()),
            issued_at,
            expires_at,
            revoked: false,
            revoked_by: None,
        };
        self.tokens.insert(token.clone()).await?;
        self.subjects.lock().unwrap().push(subject);

        Ok(AccessTokenResponse {
            token_id: token.token_id,
            access_token: token.access_token,
            scope: token.scope,
            issued_at,
            expires_at,
            expires_in: (expires_at - issued_at).num_seconds(),
            refresh_token: Some(format!("rt-{n}")),
        })
    }
}
