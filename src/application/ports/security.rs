// src/application/ports/security.rs
use crate::application::{
    ApplicationResult,
    dto::{AccessTokenResponse, TokenSubject},
    ports::app_policy::AppPolicy,
};
use async_trait::async_trait;

/// PKCE comparison primitive (RFC 7636).
pub trait PkceVerifier: Send + Sync {
    /// `challenge` and `method` come from the authorization request, `verifier`
    /// from the token request. Returns `false` for any mismatch or malformed
    /// input.
    fn verify(
        &self,
        challenge: Option<&str>,
        verifier: Option<&str>,
        method: Option<&str>,
        app: &AppPolicy,
    ) -> bool;
}

/// Mints access tokens. Owned by the generic token-issuance subsystem; the
/// issuer is expected to persist the token before returning.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AccessTokenResponse>;
}
