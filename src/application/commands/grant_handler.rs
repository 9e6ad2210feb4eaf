use crate::application::{
    ApplicationResult,
    dto::{AccessTokenResponse, TokenRequest, ValidatedGrant},
    error::ApplicationError,
};
use async_trait::async_trait;
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::debug;

/// One OAuth2 grant type as seen by the token endpoint.
#[async_trait]
pub trait GrantHandler: Send + Sync {
    fn grant_type(&self) -> &str;

    async fn validate_grant(&self, request: &TokenRequest) -> ApplicationResult<ValidatedGrant>;

    async fn authorize_access_delegation(&self, grant: &ValidatedGrant) -> ApplicationResult<bool>;

    async fn issue(
        &self,
        request: &TokenRequest,
        grant: &ValidatedGrant,
    ) -> ApplicationResult<AccessTokenResponse>;

    fn issue_refresh_token(&self) -> bool;
}

#[derive(Clone, Default)]
pub struct GrantHandlerRegistry {
    handlers: HashMap<String, Arc<dyn GrantHandler>>,
}

impl GrantHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under its grant type, replacing any previous one.
    pub fn register(&mut self, handler: Arc<dyn GrantHandler>) {
        self.handlers
            .insert(handler.grant_type().to_string(), handler);
    }

    pub fn get(&self, grant_type: &str) -> Option<Arc<dyn GrantHandler>> {
        self.handlers.get(grant_type).cloned()
    }

    /// validate -> authorize -> issue with the handler registered for the
    /// request's grant type.
    pub async fn exchange(&self, request: &TokenRequest) -> ApplicationResult<AccessTokenResponse> {
        let handler = self
            .get(&request.grant_type)
            .ok_or_else(|| ApplicationError::unsupported_grant_type(&request.grant_type))?;

        let grant = handler.validate_grant(request).await?;
        if !handler.authorize_access_delegation(&grant).await? {
            debug!(client_id = %request.client_id, grant_type = %request.grant_type, "access delegation refused");
            return Err(ApplicationError::unauthorized("access delegation not authorized"));
        }
        handler.issue(request, &grant).await
    }
}

impl fmt::Debug for GrantHandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.handlers.keys().collect();
        types.sort();
        f.debug_struct("GrantHandlerRegistry")
            .field("grant_types", &types)
            .finish()
    }
}
