// src/domain/authorization_code/entity.rs
use super::value_objects::{CodeId, CodeState, Scope, TokenBindingReference};
use crate::domain::user::AuthorizedUser;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Codes with less than this much validity left are rejected as expired, so a
/// code that would run out mid-request is never accepted.
pub const MIN_VALIDITY_MS: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationCode {
    pub code_id: CodeId,
    pub client_id: String,
    pub code: String,
    pub authorized_user: AuthorizedUser,
    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pkce_challenge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pkce_challenge_method: Option<String>,
    pub issued_at: DateTime<Utc>,
    #[serde(with = "duration_ms")]
    pub validity_period: Duration,
    #[serde(default)]
    pub token_binding_reference: TokenBindingReference,
    pub state: CodeState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_token_id: Option<String>,
}

/// Data captured by the authorization endpoint when it hands out a code.
#[derive(Debug, Clone)]
pub struct NewAuthorizationCode {
    pub client_id: String,
    pub code: String,
    pub authorized_user: AuthorizedUser,
    pub scope: Scope,
    pub callback_url: Option<String>,
    pub pkce_challenge: Option<String>,
    pub pkce_challenge_method: Option<String>,
    pub validity_period: Duration,
    pub token_binding_reference: TokenBindingReference,
}

impl AuthorizationCode {
    pub fn issue(new: NewAuthorizationCode, issued_at: DateTime<Utc>) -> Self {
        Self {
            code_id: CodeId::generate(),
            client_id: new.client_id,
            code: new.code,
            authorized_user: new.authorized_user,
            scope: new.scope,
            callback_url: new.callback_url,
            pkce_challenge: new.pkce_challenge,
            pkce_challenge_method: new.pkce_challenge_method,
            issued_at,
            validity_period: new.validity_period,
            token_binding_reference: new.token_binding_reference,
            state: CodeState::Active,
            bound_token_id: None,
        }
    }

    /// `None` when the expiry instant is not representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at.checked_add_signed(self.validity_period)
    }

    /// Remaining validity at `now`; negative once the code has run out.
    pub fn time_to_expire(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.expires_at().map(|expires_at| expires_at - now)
    }

    pub fn is_within_min_validity(&self, now: DateTime<Utc>) -> bool {
        match self.time_to_expire(now) {
            Some(remaining) => remaining.num_milliseconds() < MIN_VALIDITY_MS,
            // Past the end of the calendar: no practical expiry, unless negative.
            None => self.validity_period < Duration::zero(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == CodeState::Active
    }

    /// Callback URL recorded by the authorization request, if it was non-empty.
    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn pkce_challenge(&self) -> Option<&str> {
        self.pkce_challenge
            .as_deref()
            .filter(|challenge| !challenge.trim().is_empty())
    }
}

mod duration_ms {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_milliseconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = i64::deserialize(deserializer)?;
        Duration::try_milliseconds(ms)
            .ok_or_else(|| D::Error::custom(format!("validity period of {ms} ms is out of range")))
    }
}
