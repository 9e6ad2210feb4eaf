// src/domain/authorization_code/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};
use uuid::Uuid;

/// Binding reference recorded when the client did not use token binding.
pub const NO_TOKEN_BINDING: &str = "none";

/// Lifecycle state of a persisted authorization code.
///
/// `Active` is the only non-terminal state. A code leaves it exactly once and
/// every later presentation is treated as misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodeState {
    Active,
    /// Consumed: a token was issued and bound to the code.
    Inactive,
    Expired,
    Revoked,
}

impl CodeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Expired => "EXPIRED",
            Self::Revoked => "REVOKED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }

    /// Terminal states may replace each other; nothing may return to `Active`.
    pub fn can_transition_to(&self, next: Self) -> bool {
        next != Self::Active || *self == Self::Active
    }
}

impl fmt::Display for CodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeState {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "EXPIRED" => Ok(Self::Expired),
            "REVOKED" => Ok(Self::Revoked),
            other => Err(DomainError::Validation(format!(
                "unknown authorization code state: {other}"
            ))),
        }
    }
}

/// Internal identifier of an authorization code row, distinct from the code
/// value handed to the client. Safe to log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeId(String);

impl CodeId {
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::Validation(
                "authorization code id must not be empty".into(),
            ));
        }
        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CodeId> for String {
    fn from(value: CodeId) -> Self {
        value.0
    }
}

/// Granted scope. Kept ordered so the rendered scope string, and every cache
/// key derived from it, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(BTreeSet<String>);

impl Scope {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            values
                .into_iter()
                .map(Into::into)
                .filter(|value: &String| !value.trim().is_empty())
                .collect(),
        )
    }

    /// Parse a space-delimited scope parameter.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split_whitespace())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_scope_string(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_scope_string())
    }
}

/// Opaque reference tying a token to a client-side binding mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenBindingReference(String);

impl TokenBindingReference {
    /// Blank references collapse to [`NO_TOKEN_BINDING`].
    pub fn new(reference: Option<&str>) -> Self {
        match reference.map(str::trim).filter(|r| !r.is_empty()) {
            Some(reference) => Self(reference.to_string()),
            None => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_bound(&self) -> bool {
        self.0 != NO_TOKEN_BINDING
    }
}

impl Default for TokenBindingReference {
    fn default() -> Self {
        Self(NO_TOKEN_BINDING.to_string())
    }
}

impl fmt::Display for TokenBindingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
