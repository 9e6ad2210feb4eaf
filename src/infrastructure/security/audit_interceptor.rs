use crate::application::ApplicationResult;
use crate::application::ports::{interceptor::TokenEventInterceptor, time::Clock};
use crate::domain::access_token::AccessToken;
use crate::domain::audit::{entity::AuditLog, repository::AuditLogRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Records every system-initiated token revocation in the audit log.
pub struct AuditLogInterceptor {
    audit_log_repo: Arc<dyn AuditLogRepository>,
    clock: Arc<dyn Clock>,
}

impl AuditLogInterceptor {
    pub fn new(audit_log_repo: Arc<dyn AuditLogRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            audit_log_repo,
            clock,
        }
    }
}

#[async_trait]
impl TokenEventInterceptor for AuditLogInterceptor {
    fn name(&self) -> &str {
        "audit_log"
    }

    async fn on_post_token_revocation(
        &self,
        token: &AccessToken,
        metadata: &HashMap<String, String>,
    ) -> ApplicationResult<()> {
        let log = AuditLog {
            action: AuditLog::TOKEN_REVOKED_ON_CODE_REPLAY.to_string(),
            client_id: token.client_id.clone(),
            user_id: token.authorized_user.user_id().map(str::to_string),
            code_id: metadata
                .get("code_id")
                .cloned()
                .or_else(|| token.authorization_code_id.as_ref().map(ToString::to_string)),
            token_id: Some(token.token_id.clone()),
            details: Some(serde_json::json!({
                "reason": metadata.get("reason"),
                "revoked_by": token.revoked_by,
                "scope": token.scope.as_scope_string(),
            })),
            occurred_at: self.clock.now(),
        };
        self.audit_log_repo.insert(log).await?;
        Ok(())
    }
}
