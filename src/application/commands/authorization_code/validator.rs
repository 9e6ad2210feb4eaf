//! Pure checks over a fetched authorization code. Side effects (expiry writes,
//! burning, cache eviction) are applied by the caller based on the verdict.

use crate::application::error::FailureCause;
use crate::domain::authorization_code::{AuthorizationCode, CodeState};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StateVerdict {
    /// Lifecycle and freshness checks passed.
    Usable,
    /// Terminal state observed; nothing left to write.
    Reject(FailureCause),
    /// Still stored as `ACTIVE` (or just claimed) but under the validity floor.
    Expire,
}

pub(crate) fn check_state(code: &AuthorizationCode, now: DateTime<Utc>) -> StateVerdict {
    match code.state {
        CodeState::Inactive => StateVerdict::Reject(FailureCause::Replayed),
        CodeState::Revoked => StateVerdict::Reject(FailureCause::Revoked),
        CodeState::Expired => StateVerdict::Reject(FailureCause::Expired),
        CodeState::Active if code.is_within_min_validity(now) => StateVerdict::Expire,
        CodeState::Active => StateVerdict::Usable,
    }
}

/// An empty stored callback means the authorization request did not pin one.
pub(crate) fn check_callback(code: &AuthorizationCode, presented: Option<&str>) -> bool {
    match code.callback_url() {
        Some(expected) => presented == Some(expected),
        None => true,
    }
}
