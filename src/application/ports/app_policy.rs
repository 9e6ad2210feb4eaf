use crate::application::ApplicationResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Per-client settings consulted during PKCE verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppPolicy {
    pub client_id: String,
    #[serde(default)]
    pub pkce_mandatory: bool,
    #[serde(default)]
    pub pkce_support_plain: bool,
}

impl AppPolicy {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            pkce_mandatory: false,
            pkce_support_plain: false,
        }
    }

    pub fn pkce_mandatory(mut self) -> Self {
        self.pkce_mandatory = true;
        self
    }

    pub fn allow_plain_pkce(mut self) -> Self {
        self.pkce_support_plain = true;
        self
    }
}

#[async_trait]
pub trait AppPolicyRepository: Send + Sync {
    async fn find_by_client_id(&self, client_id: &str) -> ApplicationResult<Option<AppPolicy>>;
}
