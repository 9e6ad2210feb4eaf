// src/application/ports/authorization_code.rs
use crate::application::ApplicationResult;
use crate::domain::authorization_code::{AuthorizationCode, CodeId, CodeState};
use async_trait::async_trait;

/// Snapshot returned by [`AuthorizationCodeStore::validate_and_fetch`].
#[derive(Debug, Clone)]
pub struct CodeLookup {
    /// The record as it was at fetch time (before any claim).
    pub code: AuthorizationCode,
    /// Whether this caller observed the code as `ACTIVE` and claimed it.
    pub was_active: bool,
}

#[async_trait]
pub trait AuthorizationCodeStore: Send + Sync {
    async fn insert(&self, code: AuthorizationCode) -> ApplicationResult<()>;

    /// Fetch the code for `client_id` and, when it is `ACTIVE`, atomically move
    /// it to `REVOKED` in the same durable operation.
    ///
    /// Under concurrent presentation of one code exactly one caller gets
    /// `was_active == true`; every other caller sees the post-claim state.
    async fn validate_and_fetch(
        &self,
        client_id: &str,
        code: &str,
    ) -> ApplicationResult<Option<CodeLookup>>;

    /// Atomically compare-and-set `ACTIVE -> REVOKED`.
    ///
    /// Returns `true` if this call performed the transition, `false` if the code
    /// was already terminal (or unknown). Used when the record itself was served
    /// from cache.
    async fn claim(&self, code_id: &CodeId) -> ApplicationResult<bool>;

    /// Idempotent state update. Moving a code back to `ACTIVE` is rejected.
    async fn set_state(&self, code_id: &CodeId, state: CodeState) -> ApplicationResult<()>;

    /// Record the token minted from this code and leave the code `INACTIVE`.
    async fn bind_token(&self, code_id: &CodeId, token_id: &str) -> ApplicationResult<()>;
}
