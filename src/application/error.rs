// src/application/error.rs
use crate::domain::{authorization_code::CodeId, errors::DomainError, user::AuthorizedUser};
use std::fmt;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Why a grant was rejected. Kept for logs and audit only; callers of the
/// token endpoint always see `invalid_grant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCause {
    NotFound,
    Replayed,
    Expired,
    Revoked,
    CallbackMismatch,
    PkceMismatch,
    UnknownClient,
}

impl FailureCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Replayed => "replayed",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
            Self::CallbackMismatch => "callback_mismatch",
            Self::PkceMismatch => "pkce_mismatch",
            Self::UnknownClient => "unknown_client",
        }
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantFailure {
    cause: FailureCause,
    client_id: String,
    code_id: Option<CodeId>,
}

impl GrantFailure {
    pub fn new(cause: FailureCause, client_id: impl Into<String>) -> Self {
        Self {
            cause,
            client_id: client_id.into(),
            code_id: None,
        }
    }

    pub fn with_code_id(mut self, code_id: CodeId) -> Self {
        self.code_id = Some(code_id);
        self
    }

    pub fn cause(&self) -> FailureCause {
        self.cause
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn code_id(&self) -> Option<&CodeId> {
        self.code_id.as_ref()
    }
}

// Display never carries the cause: telling "expired" from "unknown" would hand
// an attacker an oracle.
impl fmt::Display for GrantFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(INVALID_GRANT)
    }
}

pub const INVALID_GRANT: &str = "invalid_grant";

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    InvalidGrant(GrantFailure),

    #[error("unsupported grant type: {0}")]
    UnsupportedGrantType(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The authorized user has no stable identifier. Continuing would leave
    /// revocations unattributed, so this always aborts the request.
    #[error("user identity unresolved: {0}")]
    UserIdentity(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn invalid_grant(failure: GrantFailure) -> Self {
        Self::InvalidGrant(failure)
    }

    pub fn unsupported_grant_type(grant_type: impl Into<String>) -> Self {
        Self::UnsupportedGrantType(grant_type.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn missing_user_id(user: &AuthorizedUser) -> Self {
        Self::UserIdentity(format!("user id not found for user: {}", user.loggable_id()))
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    pub fn failure_cause(&self) -> Option<FailureCause> {
        match self {
            Self::InvalidGrant(failure) => Some(failure.cause()),
            _ => None,
        }
    }

    /// OAuth2 error code to surface at the protocol boundary.
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::InvalidGrant(_) => INVALID_GRANT,
            Self::UnsupportedGrantType(_) => "unsupported_grant_type",
            Self::Unauthorized(_) => "unauthorized_client",
            Self::Domain(_) | Self::UserIdentity(_) | Self::Infrastructure(_) => "server_error",
        }
    }
}
