// src/domain/audit/entity.rs
use chrono::{DateTime, Utc};

/// Security-relevant event recorded around authorization-code redemption.
#[derive(Debug, Clone)]
pub struct AuditLog {
    pub action: String,
    pub client_id: String,
    pub user_id: Option<String>,
    pub code_id: Option<String>,
    pub token_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub occurred_at: DateTime<Utc>,
}

impl AuditLog {
    pub const TOKEN_REVOKED_ON_CODE_REPLAY: &'static str = "access_token.revoked.code_replay";
}
