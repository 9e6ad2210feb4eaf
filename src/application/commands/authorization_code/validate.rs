use super::{
    AuthorizationCodeGrantHandler,
    validator::{self, StateVerdict},
};
use crate::{
    application::{
        dto::{TokenRequest, ValidatedGrant},
        error::{ApplicationError, ApplicationResult, FailureCause, GrantFailure},
        ports::authorization_code::CodeLookup,
        redact::fingerprint,
    },
    domain::authorization_code::{AuthorizationCode, CodeState},
};
use tracing::{debug, warn};

impl AuthorizationCodeGrantHandler {
    /// Fetch, cascade on replay, then run the state machine. The code is left
    /// terminal whatever the outcome.
    pub async fn validate_grant(&self, request: &TokenRequest) -> ApplicationResult<ValidatedGrant> {
        let client_id = request.client_id.as_str();
        let lookup = self
            .cache
            .fetch_code(
                self.code_store.as_ref(),
                client_id,
                &request.authorization_code,
            )
            .await?;

        let Some(CodeLookup { code, was_active }) = lookup else {
            debug!(
                client_id,
                code = %fingerprint(&request.authorization_code),
                "invalid authorization code received from client"
            );
            return Err(ApplicationError::invalid_grant(GrantFailure::new(
                FailureCause::NotFound,
                client_id,
            )));
        };

        if !was_active {
            self.cascade.run(&code).await?;
        }

        self.validate_code(request, &code).await?;
        debug!(
            client_id,
            code_id = %code.code_id,
            "authorization code validated successfully"
        );
        Ok(ValidatedGrant::from(code))
    }

    async fn validate_code(
        &self,
        request: &TokenRequest,
        code: &AuthorizationCode,
    ) -> ApplicationResult<()> {
        match validator::check_state(code, self.clock.now()) {
            StateVerdict::Usable => {}
            StateVerdict::Reject(FailureCause::Replayed) => {
                self.cache.evict_code_token_key(code).await?;
                return Err(reject(FailureCause::Replayed, code));
            }
            // The store already holds REVOKED; only the cache entry goes.
            StateVerdict::Reject(FailureCause::Revoked) => {
                self.cache
                    .evict_code(&code.client_id, &code.code)
                    .await?;
                return Err(reject(FailureCause::Revoked, code));
            }
            StateVerdict::Reject(cause) => {
                return Err(reject(cause, code));
            }
            StateVerdict::Expire => {
                self.mark_expired(code).await?;
                return Err(reject(FailureCause::Expired, code));
            }
        }

        let verdict = self.check_request(request, code).await;
        // A failed burn outranks whatever the checks decided.
        self.burn(code).await?;
        match verdict? {
            Some(cause) => Err(reject(cause, code)),
            None => Ok(()),
        }
    }

    /// Callback and PKCE checks. `Ok(None)` means the request may redeem the code.
    async fn check_request(
        &self,
        request: &TokenRequest,
        code: &AuthorizationCode,
    ) -> ApplicationResult<Option<FailureCause>> {
        if !validator::check_callback(code, request.callback_uri.as_deref()) {
            return Ok(Some(FailureCause::CallbackMismatch));
        }
        self.check_pkce(request, code).await
    }

    async fn check_pkce(
        &self,
        request: &TokenRequest,
        code: &AuthorizationCode,
    ) -> ApplicationResult<Option<FailureCause>> {
        let Some(app) = self.app_policies.find_by_client_id(&code.client_id).await? else {
            return Ok(Some(FailureCause::UnknownClient));
        };
        let challenge = code.pkce_challenge();
        if challenge.is_none() && !app.pkce_mandatory {
            return Ok(None);
        }

        let verified = self.pkce_verifier.verify(
            challenge,
            request.pkce_verifier.as_deref(),
            code.pkce_challenge_method.as_deref(),
            &app,
        );
        if verified {
            return Ok(None);
        }

        warn!(
            client_id = %code.client_id,
            code_id = %code.code_id,
            "PKCE validation failed for authorization code"
        );
        Ok(Some(FailureCause::PkceMismatch))
    }

    async fn mark_expired(&self, code: &AuthorizationCode) -> ApplicationResult<()> {
        self.code_store
            .set_state(&code.code_id, CodeState::Expired)
            .await?;
        self.cache.evict_code(&code.client_id, &code.code).await
    }

    async fn burn(&self, code: &AuthorizationCode) -> ApplicationResult<()> {
        self.code_store
            .set_state(&code.code_id, CodeState::Revoked)
            .await?;
        self.cache.evict_code(&code.client_id, &code.code).await
    }
}

fn reject(cause: FailureCause, code: &AuthorizationCode) -> ApplicationError {
    debug!(
        client_id = %code.client_id,
        code_id = %code.code_id,
        cause = ?cause,
        "authorization code rejected"
    );
    ApplicationError::invalid_grant(
        GrantFailure::new(cause, code.client_id.clone()).with_code_id(code.code_id.clone()),
    )
}
